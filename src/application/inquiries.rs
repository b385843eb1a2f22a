//! Contact-form intake.
//!
//! Validation happens before any database work: a rejected form performs
//! no insert and reports a field-level message back to the page.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{ContactRepo, NewSubmissionParams, RepoError};
use crate::domain::entities::ContactSubmissionRecord;

const SOURCE: &str = "application::inquiries";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("an email address or phone number is required")]
    MissingContactMethod,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl IntakeError {
    /// Message shown on the public contact form.
    pub fn public_message(&self) -> &'static str {
        match self {
            IntakeError::MissingField("name") => "Please tell us your name.",
            IntakeError::MissingField("service") => "Please pick a service.",
            IntakeError::MissingField("description") => "Please describe your project.",
            IntakeError::MissingField(_) => "Please fill in the required fields.",
            IntakeError::MissingContactMethod => {
                "Please leave an email address or phone number so we can reach you."
            }
            IntakeError::Repo(_) => "Something went wrong sending your message. Please try again.",
        }
    }
}

/// Raw form values as posted; everything optional until validated.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub service: String,
    pub description: String,
}

pub struct InquiryService {
    contacts: Arc<dyn ContactRepo>,
}

impl InquiryService {
    pub fn new(contacts: Arc<dyn ContactRepo>) -> Self {
        Self { contacts }
    }

    pub async fn submit(&self, form: ContactForm) -> Result<ContactSubmissionRecord, IntakeError> {
        let params = validate(form)?;
        let record = self.contacts.insert_submission(params).await?;
        metrics::counter!("kadro_contact_submissions_total").increment(1);
        info!(
            target = SOURCE,
            submission_id = %record.id,
            service = %record.service,
            "contact submission stored"
        );
        Ok(record)
    }
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn validate(form: ContactForm) -> Result<NewSubmissionParams, IntakeError> {
    let name = blank_to_none(&form.name).ok_or(IntakeError::MissingField("name"))?;
    let service = blank_to_none(&form.service).ok_or(IntakeError::MissingField("service"))?;
    let description =
        blank_to_none(&form.description).ok_or(IntakeError::MissingField("description"))?;

    let email = blank_to_none(&form.email);
    let phone = blank_to_none(&form.phone);
    if email.is_none() && phone.is_none() {
        return Err(IntakeError::MissingContactMethod);
    }

    Ok(NewSubmissionParams {
        name,
        email,
        phone,
        project: blank_to_none(&form.project),
        service,
        description,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::domain::types::SubmissionStatus;

    #[derive(Default)]
    struct StubContactRepo {
        inserts: AtomicUsize,
        last: Mutex<Option<NewSubmissionParams>>,
    }

    #[async_trait]
    impl ContactRepo for StubContactRepo {
        async fn insert_submission(
            &self,
            params: NewSubmissionParams,
        ) -> Result<ContactSubmissionRecord, RepoError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            let record = ContactSubmissionRecord {
                id: Uuid::new_v4(),
                name: params.name.clone(),
                email: params.email.clone(),
                phone: params.phone.clone(),
                project: params.project.clone(),
                service: params.service.clone(),
                description: params.description.clone(),
                status: SubmissionStatus::New,
                created_at: OffsetDateTime::UNIX_EPOCH,
            };
            *self.last.lock().unwrap() = Some(params);
            Ok(record)
        }

        async fn list_submissions(&self) -> Result<Vec<ContactSubmissionRecord>, RepoError> {
            Ok(Vec::new())
        }

        async fn find_submission(
            &self,
            _id: Uuid,
        ) -> Result<Option<ContactSubmissionRecord>, RepoError> {
            Ok(None)
        }

        async fn set_status(
            &self,
            _id: Uuid,
            _status: SubmissionStatus,
        ) -> Result<ContactSubmissionRecord, RepoError> {
            Err(RepoError::NotFound)
        }

        async fn delete_submission(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }

        async fn count_with_status(&self, _status: SubmissionStatus) -> Result<i64, RepoError> {
            Ok(0)
        }
    }

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "".to_string(),
            phone: "+45 12 34 56 78".to_string(),
            project: "".to_string(),
            service: "short-form".to_string(),
            description: "Weekly shorts for a cooking channel".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_both_contact_methods_blocks_the_insert() {
        let repo = Arc::new(StubContactRepo::default());
        let service = InquiryService::new(Arc::clone(&repo) as Arc<dyn ContactRepo>);
        let mut form = valid_form();
        form.phone = "   ".to_string();

        let err = service.submit(form).await.unwrap_err();
        assert!(matches!(err, IntakeError::MissingContactMethod));
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn phone_only_submission_stores_a_null_email() {
        let repo = Arc::new(StubContactRepo::default());
        let service = InquiryService::new(Arc::clone(&repo) as Arc<dyn ContactRepo>);

        let record = service.submit(valid_form()).await.unwrap();
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(record.email, None);
        assert_eq!(record.phone.as_deref(), Some("+45 12 34 56 78"));
        let stored = repo.last.lock().unwrap().clone().unwrap();
        assert_eq!(stored.email, None);
    }

    #[tokio::test]
    async fn required_fields_are_checked_before_any_io() {
        let repo = Arc::new(StubContactRepo::default());
        let service = InquiryService::new(Arc::clone(&repo) as Arc<dyn ContactRepo>);
        let mut form = valid_form();
        form.description = "".to_string();

        let err = service.submit(form).await.unwrap_err();
        assert!(matches!(err, IntakeError::MissingField("description")));
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 0);
    }
}
