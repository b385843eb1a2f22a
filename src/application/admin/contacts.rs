//! Admin contact-inbox service.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::{AuditEntry, AuditRepo, ContactRepo, RepoError};
use crate::domain::entities::ContactSubmissionRecord;
use crate::domain::types::SubmissionStatus;

#[derive(Debug, Error)]
pub enum ContactsAdminError {
    #[error("contact submission not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct ContactsAdminService {
    contacts: Arc<dyn ContactRepo>,
    audit: Arc<dyn AuditRepo>,
    actor: String,
}

impl ContactsAdminService {
    pub fn new(contacts: Arc<dyn ContactRepo>, audit: Arc<dyn AuditRepo>, actor: String) -> Self {
        Self {
            contacts,
            audit,
            actor,
        }
    }

    pub async fn list(&self) -> Result<Vec<ContactSubmissionRecord>, ContactsAdminError> {
        Ok(self.contacts.list_submissions().await?)
    }

    pub async fn find(&self, id: Uuid) -> Result<ContactSubmissionRecord, ContactsAdminError> {
        self.contacts
            .find_submission(id)
            .await?
            .ok_or(ContactsAdminError::NotFound)
    }

    pub async fn new_count(&self) -> Result<i64, ContactsAdminError> {
        Ok(self.contacts.count_with_status(SubmissionStatus::New).await?)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<ContactSubmissionRecord, ContactsAdminError> {
        let record = match self.contacts.set_status(id, status).await {
            Ok(record) => record,
            Err(RepoError::NotFound) => return Err(ContactsAdminError::NotFound),
            Err(err) => return Err(err.into()),
        };
        self.audit
            .append(AuditEntry {
                actor: self.actor.clone(),
                action: format!("contacts.status.{}", status.as_str()),
                entity_type: "contact_submission".to_string(),
                entity_id: Some(id.to_string()),
                payload: None,
            })
            .await?;
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ContactsAdminError> {
        self.find(id).await?;
        self.contacts.delete_submission(id).await?;
        self.audit
            .append(AuditEntry {
                actor: self.actor.clone(),
                action: "contacts.delete".to_string(),
                entity_type: "contact_submission".to_string(),
                entity_id: Some(id.to_string()),
                payload: None,
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::OffsetDateTime;

    use super::*;
    use crate::application::repos::NewSubmissionParams;

    #[derive(Default)]
    struct StubContactRepo {
        submissions: Mutex<Vec<ContactSubmissionRecord>>,
    }

    impl StubContactRepo {
        fn seeded() -> Arc<Self> {
            let repo = Self::default();
            repo.submissions.lock().unwrap().push(ContactSubmissionRecord {
                id: Uuid::new_v4(),
                name: "Ada".to_string(),
                email: Some("ada@example.com".to_string()),
                phone: None,
                project: None,
                service: "short-form".to_string(),
                description: "Weekly shorts".to_string(),
                status: SubmissionStatus::New,
                created_at: OffsetDateTime::UNIX_EPOCH,
            });
            Arc::new(repo)
        }
    }

    #[async_trait]
    impl ContactRepo for StubContactRepo {
        async fn insert_submission(
            &self,
            _params: NewSubmissionParams,
        ) -> Result<ContactSubmissionRecord, RepoError> {
            unimplemented!("not exercised")
        }

        async fn list_submissions(&self) -> Result<Vec<ContactSubmissionRecord>, RepoError> {
            Ok(self.submissions.lock().unwrap().clone())
        }

        async fn find_submission(
            &self,
            id: Uuid,
        ) -> Result<Option<ContactSubmissionRecord>, RepoError> {
            Ok(self
                .submissions
                .lock()
                .unwrap()
                .iter()
                .find(|record| record.id == id)
                .cloned())
        }

        async fn set_status(
            &self,
            id: Uuid,
            status: SubmissionStatus,
        ) -> Result<ContactSubmissionRecord, RepoError> {
            let mut submissions = self.submissions.lock().unwrap();
            let record = submissions
                .iter_mut()
                .find(|record| record.id == id)
                .ok_or(RepoError::NotFound)?;
            record.status = status;
            Ok(record.clone())
        }

        async fn delete_submission(&self, id: Uuid) -> Result<(), RepoError> {
            self.submissions
                .lock()
                .unwrap()
                .retain(|record| record.id != id);
            Ok(())
        }

        async fn count_with_status(&self, status: SubmissionStatus) -> Result<i64, RepoError> {
            Ok(self
                .submissions
                .lock()
                .unwrap()
                .iter()
                .filter(|record| record.status == status)
                .count() as i64)
        }
    }

    #[derive(Default)]
    struct StubAuditRepo {
        entries: Mutex<Vec<AuditEntry>>,
    }

    #[async_trait]
    impl AuditRepo for StubAuditRepo {
        async fn append(&self, entry: AuditEntry) -> Result<(), RepoError> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }

        async fn recent(
            &self,
            _limit: i64,
        ) -> Result<Vec<crate::domain::entities::AuditLogRecord>, RepoError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn status_transitions_persist_and_leave_an_audit_trail() {
        let repo = StubContactRepo::seeded();
        let audit = Arc::new(StubAuditRepo::default());
        let service = ContactsAdminService::new(
            Arc::clone(&repo) as Arc<dyn ContactRepo>,
            Arc::clone(&audit) as Arc<dyn AuditRepo>,
            "admin".to_string(),
        );
        let id = repo.submissions.lock().unwrap()[0].id;

        let record = service
            .set_status(id, SubmissionStatus::Replied)
            .await
            .unwrap();
        assert_eq!(record.status, SubmissionStatus::Replied);
        assert_eq!(service.new_count().await.unwrap(), 0);

        let entries = audit.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "contacts.status.replied");
    }

    #[tokio::test]
    async fn unknown_submissions_surface_not_found() {
        let service = ContactsAdminService::new(
            StubContactRepo::seeded(),
            Arc::new(StubAuditRepo::default()),
            "admin".to_string(),
        );
        let err = service
            .set_status(Uuid::new_v4(), SubmissionStatus::Archived)
            .await
            .unwrap_err();
        assert!(matches!(err, ContactsAdminError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_the_submission() {
        let repo = StubContactRepo::seeded();
        let service = ContactsAdminService::new(
            Arc::clone(&repo) as Arc<dyn ContactRepo>,
            Arc::new(StubAuditRepo::default()),
            "admin".to_string(),
        );
        let id = repo.submissions.lock().unwrap()[0].id;
        service.delete(id).await.unwrap();
        assert!(repo.submissions.lock().unwrap().is_empty());
    }
}
