//! OPD management use case

use crate::application::auth::require_user;
use crate::application::commit;
use crate::domain::opd::next_opd_id;
use crate::domain::{Opd, Update};
use crate::error::{MonitorError, Result};
use crate::infrastructure::{FileSystemRepository, MonitorRepository};

/// Service for adding, editing and removing work units
pub struct OpdService {
    repository: FileSystemRepository,
}

impl OpdService {
    pub fn new(repository: FileSystemRepository) -> Self {
        OpdService { repository }
    }

    /// OPDs whose name contains `search`, in stored order
    pub fn list(&self, search: Option<&str>) -> Result<Vec<Opd>> {
        let data = self.repository.load_data()?;
        let term = search.unwrap_or("");
        Ok(data.opds.into_iter().filter(|o| o.matches(term)).collect())
    }

    pub fn add(&self, name: &str, pagu_murni: f64, id: Option<&str>) -> Result<Opd> {
        require_user(&self.repository)?;
        let data = self.repository.load_data()?;

        let id = match id.map(str::trim) {
            Some("") => return Err(MonitorError::Invalid("OPD id is empty".to_string())),
            Some(id) => id.to_string(),
            None => next_opd_id(&data.opds),
        };
        let opd = Opd::new(id, name.trim(), pagu_murni);
        commit(&self.repository, Update::CreateOpd(opd.clone()))?;
        tracing::info!(opd_id = %opd.id, "added OPD");
        Ok(opd)
    }

    pub fn update(&self, id: &str, name: Option<&str>, pagu_murni: Option<f64>) -> Result<Opd> {
        require_user(&self.repository)?;
        if name.is_none() && pagu_murni.is_none() {
            return Err(MonitorError::Invalid(
                "nothing to update; pass --name or --pagu".to_string(),
            ));
        }
        let data = self.repository.load_data()?;
        let mut opd = data
            .opd(id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("OPD", id))?;

        if let Some(name) = name {
            opd.name = name.trim().to_string();
        }
        if let Some(pagu) = pagu_murni {
            opd.pagu_murni = pagu;
        }
        commit(&self.repository, Update::UpsertOpd(opd.clone()))?;
        Ok(opd)
    }

    /// Remove an OPD together with its progress row
    pub fn remove(&self, id: &str) -> Result<Opd> {
        require_user(&self.repository)?;
        let data = self.repository.load_data()?;
        let opd = data
            .opd(id)
            .cloned()
            .ok_or_else(|| MonitorError::not_found("OPD", id))?;
        commit(&self.repository, Update::RemoveOpd(id.to_string()))?;
        tracing::info!(opd_id = %id, "removed OPD");
        Ok(opd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::logged_in_admin;

    #[test]
    fn test_add_generates_ids_and_syncs_progress() {
        let (_temp, repo) = logged_in_admin();
        let service = OpdService::new(repo.clone());

        let first = service.add("Dinas Kesehatan", 1500.0, None).unwrap();
        let second = service.add("Biro Umum", 80.0, None).unwrap();
        assert_eq!(first.id, "opd-001");
        assert_eq!(second.id, "opd-002");

        let data = repo.load_data().unwrap();
        assert_eq!(data.progress.len(), 2);
        assert_eq!(data.progress_for("opd-001").unwrap().pagu_target, 1500.0);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let (_temp, repo) = logged_in_admin();
        let service = OpdService::new(repo);
        service.add("A", 1.0, Some("x")).unwrap();
        assert!(service.add("B", 1.0, Some("x")).is_err());
    }

    #[test]
    fn test_add_padded_id_does_not_replace_existing() {
        let (_temp, repo) = logged_in_admin();
        let service = OpdService::new(repo.clone());
        service.add("Dinas Asli", 500.0, Some("x")).unwrap();

        let err = service.add("Penimpa", 1.0, Some(" x ")).unwrap_err();
        assert!(matches!(err, MonitorError::Invalid(_)));
        assert!(service.add("Kosong", 1.0, Some("   ")).is_err());

        let data = repo.load_data().unwrap();
        assert_eq!(data.opds.len(), 1);
        assert_eq!(data.opds[0].name, "Dinas Asli");
        assert_eq!(data.opds[0].pagu_murni, 500.0);
        assert_eq!(data.progress_for("x").unwrap().pagu_target, 500.0);
    }

    #[test]
    fn test_update_and_remove() {
        let (_temp, repo) = logged_in_admin();
        let service = OpdService::new(repo.clone());
        let opd = service.add("Dinas A", 100.0, None).unwrap();

        let updated = service.update(&opd.id, None, Some(250.0)).unwrap();
        assert_eq!(updated.name, "Dinas A");
        assert_eq!(repo.load_data().unwrap().progress[0].pagu_target, 250.0);

        assert!(service.update(&opd.id, None, None).is_err());
        assert!(matches!(
            service.update("nope", Some("x"), None).unwrap_err(),
            MonitorError::NotFound { .. }
        ));

        service.remove(&opd.id).unwrap();
        let data = repo.load_data().unwrap();
        assert!(data.opds.is_empty());
        assert!(data.progress.is_empty());
    }

    #[test]
    fn test_list_filters_by_name() {
        let (_temp, repo) = logged_in_admin();
        let service = OpdService::new(repo);
        service.add("Dinas Kesehatan", 1.0, None).unwrap();
        service.add("Biro Hukum", 1.0, None).unwrap();

        assert_eq!(service.list(None).unwrap().len(), 2);
        let found = service.list(Some("HUKUM")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Biro Hukum");
    }

    #[test]
    fn test_mutations_need_login() {
        let (_temp, repo) = logged_in_admin();
        repo.clear_session().unwrap();
        let err = OpdService::new(repo).add("A", 1.0, None).unwrap_err();
        assert!(matches!(err, MonitorError::NotLoggedIn));
    }
}
