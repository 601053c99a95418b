//! Link CRUD orchestration service.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_alias};
use crate::utils::url_validator::validate_target_url;
use serde_json::{Map, Value};

/// Upper bound for the code generator's collision retry loop.
const MAX_ATTEMPTS: usize = 20;

/// Service for creating, querying, updating, and deleting links.
///
/// Owns input validation (URL scheme, alias shape, field trimming) and the
/// collision-retry loop for generated codes. Uniqueness itself is decided by
/// storage at insert time; the checks here only shortcut the common case.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a link, generating a code when no alias is supplied.
    ///
    /// Inputs are trimmed first. A blank alias counts as absent; a blank
    /// title is stored as no title. URL and alias problems are reported
    /// together, one message per field.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad URL or alias format.
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] if code generation exhausts its retries.
    pub async fn create(
        &self,
        url: String,
        title: Option<String>,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let url = url.trim().to_string();
        let title = normalize_title(title);
        let custom_code = custom_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let mut errors = Map::new();
        collect_field_error(&mut errors, validate_target_url(&url));
        if let Some(code) = &custom_code {
            collect_field_error(&mut errors, validate_alias(code));
        }
        if !errors.is_empty() {
            return Err(AppError::validation_map(errors));
        }

        let code = match custom_code {
            Some(custom) => {
                if self.link_repository.code_exists(&custom).await? {
                    return Err(AppError::conflict("code", "Alias already in use"));
                }
                custom
            }
            None => self.generate_unique_code().await?,
        };

        let new_link = NewLink { code, url, title };

        self.link_repository.create(new_link).await
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))
    }

    /// Lists links newest first, optionally filtered by substring.
    ///
    /// A blank filter lists everything.
    pub async fn list(&self, filter: Option<String>) -> Result<Vec<Link>, AppError> {
        let filter = filter
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        self.link_repository.list(filter.as_deref()).await
    }

    /// Partially updates a link.
    ///
    /// Only supplied fields are touched; any touch refreshes `updated_at`.
    /// Supplying an empty title clears it. An alias change re-runs the
    /// format rules and must not collide with another link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] when no recognized field is supplied.
    /// Returns [`AppError::Validation`] on a bad URL or alias format.
    /// Returns [`AppError::Conflict`] if the new alias belongs to another link.
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn update(
        &self,
        id: i64,
        url: Option<String>,
        title: Option<String>,
        code: Option<String>,
    ) -> Result<Link, AppError> {
        let patch = LinkPatch {
            url: url.map(|u| u.trim().to_string()),
            title: title.map(normalize_title_value),
            code: code.map(|c| c.trim().to_string()),
        };

        if patch.is_empty() {
            return Err(AppError::bad_request("Nothing to update"));
        }

        let mut errors = Map::new();
        if let Some(url) = &patch.url {
            collect_field_error(&mut errors, validate_target_url(url));
        }
        if let Some(code) = &patch.code {
            collect_field_error(&mut errors, validate_alias(code));
        }
        if !errors.is_empty() {
            return Err(AppError::validation_map(errors));
        }

        self.link_repository.update(id, patch).await
    }

    /// Deletes a link and, transitively, its click history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete(id).await? {
            return Err(AppError::not_found("Link not found"));
        }

        Ok(())
    }

    /// Returns every link ordered by id, for tabular export.
    pub async fn export_all(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.export_all().await
    }

    /// Generates a code nothing currently uses, with collision retry.
    ///
    /// The existence probe keeps the loop short; a race that slips past it
    /// still dies on the insert-time constraint.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if !self.link_repository.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::internal(format!(
            "no free code after {MAX_ATTEMPTS} draws"
        )))
    }
}

/// Blank titles collapse to no title.
fn normalize_title(title: Option<String>) -> Option<String> {
    title.and_then(|t| {
        let t = t.trim().to_string();
        if t.is_empty() { None } else { Some(t) }
    })
}

/// Patch form of [`normalize_title`]: an empty value means "clear".
fn normalize_title_value(title: String) -> Option<String> {
    let t = title.trim().to_string();
    if t.is_empty() { None } else { Some(t) }
}

/// Folds a field-level validation failure into a shared error map.
fn collect_field_error(errors: &mut Map<String, Value>, result: Result<(), AppError>) {
    if let Err(AppError::Validation { errors: fields }) = result {
        if let Value::Object(fields) = fields {
            errors.extend(fields);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn test_link(id: i64, code: &str, url: &str) -> Link {
        Link::new(id, code.to_string(), url.to_string(), None, 0, Utc::now(), None)
    }

    #[tokio::test]
    async fn test_create_with_generated_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_code_exists()
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code.len() == 6 && new_link.url == "https://example.com")
            .times(1)
            .returning(|nl| Ok(test_link(1, &nl.code, &nl.url)));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_custom_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_code_exists()
            .withf(|code| code == "demo1")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "demo1")
            .times(1)
            .returning(|nl| Ok(test_link(1, &nl.code, &nl.url)));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create(
                "https://example.com/page".to_string(),
                None,
                Some("demo1".to_string()),
            )
            .await;

        assert_eq!(result.unwrap().code, "demo1");
    }

    #[tokio::test]
    async fn test_create_taken_alias_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_code_exists()
            .times(1)
            .returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create(
                "https://example.com".to_string(),
                None,
                Some("taken".to_string()),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_invalid_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create("javascript:alert(1)".to_string(), None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_reports_url_and_alias_errors_together() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let err = service
            .create("not-a-url".to_string(), None, Some("x!".to_string()))
            .await
            .unwrap_err();

        match err {
            AppError::Validation { errors } => {
                assert!(errors.get("url").is_some());
                assert!(errors.get("code").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_blank_alias_means_generate() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_code_exists()
            .withf(|code| code.len() == 6)
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .times(1)
            .returning(|nl| Ok(test_link(1, &nl.code, &nl.url)));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create(
                "https://example.com".to_string(),
                None,
                Some("   ".to_string()),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_blank_title_stored_as_none() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_code_exists()
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.title.is_none())
            .times(1)
            .returning(|nl| Ok(test_link(1, &nl.code, &nl.url)));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create(
                "https://example.com".to_string(),
                Some("   ".to_string()),
                None,
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generator_gives_up_when_draws_exhausted() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_code_exists()
            .times(MAX_ATTEMPTS)
            .returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.get(99).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_blank_filter_lists_everything() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_list()
            .withf(|filter| filter.is_none())
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.list(Some("   ".to_string())).await;
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_nothing_is_distinct_error() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_update().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.update(1, None, None, None).await;
        assert!(matches!(result.unwrap_err(), AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_update_title_only() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_update()
            .withf(|id, patch| {
                *id == 1
                    && patch.url.is_none()
                    && patch.code.is_none()
                    && patch.title == Some(Some("Demo".to_string()))
            })
            .times(1)
            .returning(|id, _| Ok(test_link(id, "demo1", "https://example.com")));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .update(1, None, Some("Demo".to_string()), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_empty_title_clears_it() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_update()
            .withf(|_, patch| patch.title == Some(None))
            .times(1)
            .returning(|id, _| Ok(test_link(id, "demo1", "https://example.com")));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.update(1, None, Some("  ".to_string()), None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_bad_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_update().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .update(1, Some("ftp://example.com".to_string()), None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_alias() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_update().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        // Unlike create, a blank alias in a patch is a format error, not a
        // request to generate.
        let result = service.update(1, None, None, Some("  ".to_string())).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.delete(12).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(true));

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(service.delete(12).await.is_ok());
    }
}
