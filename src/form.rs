//! The create-book form: field values, client-side validation and the
//! submission state machine, independent of how it is drawn.

use crate::client::{BookClient, BookNode, Transport};
use crate::error::Result;
use crate::model::{BookField, NewBook};
use crate::validation::{self, FieldErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl SubmitStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitStatus::Succeeded(msg) | SubmitStatus::Failed(msg) => Some(msg),
            SubmitStatus::Idle | SubmitStatus::Submitting => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateBookForm {
    title: String,
    author: String,
    content: String,
    status: SubmitStatus,
    errors: FieldErrors,
}

impl CreateBookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Content => &self.content,
        }
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Content => &mut self.content,
        }
    }

    pub fn set(&mut self, field: BookField, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
        self.errors.clear(field);
    }

    pub fn push_char(&mut self, field: BookField, c: char) {
        self.value_mut(field).push(c);
        self.errors.clear(field);
    }

    pub fn pop_char(&mut self, field: BookField) {
        self.value_mut(field).pop();
        self.errors.clear(field);
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Run the client-side rules and record per-field messages.
    pub fn validate(&mut self) -> Option<NewBook> {
        self.errors = validation::validate_form(&self.title, &self.author, &self.content);
        if !self.errors.is_empty() {
            return None;
        }
        match NewBook::new(&self.title, &self.author, &self.content) {
            Ok(input) => Some(input),
            Err(e) => {
                self.status = SubmitStatus::Failed(e.user_message());
                None
            }
        }
    }

    /// Enter `Submitting` and return the input to send.
    ///
    /// Returns `None` while a submission is already in flight or when the
    /// fields do not validate; nothing should be sent in either case.
    pub fn begin_submit(&mut self) -> Option<NewBook> {
        if self.is_submitting() {
            tracing::debug!("Ignored submit while a submission is in flight");
            return None;
        }
        let input = self.validate()?;
        self.status = SubmitStatus::Submitting;
        Some(input)
    }

    /// Leave `Submitting` with the server's answer.
    ///
    /// Success clears the fields; failure keeps them for another try.
    pub fn finish_submit(&mut self, result: &Result<BookNode>) {
        match result {
            Ok(book) => {
                self.status = SubmitStatus::Succeeded(format!("\"{}\" was created", book.title));
                self.title.clear();
                self.author.clear();
                self.content.clear();
                self.errors = FieldErrors::default();
            }
            Err(e) if e.is_validation() => {
                tracing::debug!(error = %e, "Book rejected by the server");
                self.status = SubmitStatus::Failed(e.user_message());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Book creation failed");
                self.status = SubmitStatus::Failed(e.user_message());
            }
        }
    }

    /// Validate, send, and record the outcome.
    ///
    /// Returns `None` when nothing was sent.
    pub async fn submit<T: Transport>(
        &mut self,
        client: &BookClient<T>,
    ) -> Option<Result<BookNode>> {
        let input = self.begin_submit()?;
        let result = client.create_book(&input).await;
        self.finish_submit(&result);
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{GraphQlRequest, GraphQlResponse, QueryCache};
    use crate::error::ShelfError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
    }

    impl Transport for CountingTransport {
        async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GraphQlResponse {
                data: Some(json!({ "createBook": {
                    "id": "7",
                    "title": request.variables["title"],
                    "author": request.variables["author"],
                    "content": request.variables["content"],
                } })),
                errors: Vec::new(),
            })
        }
    }

    fn client() -> BookClient<CountingTransport> {
        BookClient::new(CountingTransport::default(), QueryCache::new())
    }

    #[tokio::test]
    async fn test_short_content_rejected_before_network() {
        let client = client();
        let mut form = CreateBookForm::with_values("Dune", "Herbert", "short");

        assert!(form.submit(&client).await.is_none());
        assert_eq!(client.transport().calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            form.errors().get(BookField::Content),
            Some("Content must be at least 10 characters")
        );
        assert_eq!(form.status(), &SubmitStatus::Idle);
        assert_eq!(form.value(BookField::Content), "short");
    }

    #[tokio::test]
    async fn test_successful_submit_resets_fields() {
        let client = client();
        let mut form = CreateBookForm::with_values("Dune", "Herbert", "Desert planet saga");

        let result = form.submit(&client).await.unwrap();
        assert_eq!(result.unwrap().title, "Dune");
        assert_eq!(
            form.status(),
            &SubmitStatus::Succeeded("\"Dune\" was created".to_string())
        );
        for field in BookField::ALL {
            assert!(form.value(field).is_empty());
        }
    }

    #[test]
    fn test_failed_submit_keeps_fields() {
        let mut form = CreateBookForm::with_values("Dune", "X", "Y, at least 10 chars");
        assert!(form.begin_submit().is_some());

        form.finish_submit(&Err(ShelfError::GraphQl {
            message: "Validation failed: Title has already been taken".to_string(),
            code: Some("VALIDATION_ERROR".to_string()),
        }));

        assert_eq!(
            form.status().message(),
            Some("Validation failed: Title has already been taken")
        );
        assert_eq!(form.value(BookField::Title), "Dune");
        assert_eq!(form.value(BookField::Content), "Y, at least 10 chars");
    }

    #[test]
    fn test_network_failure_shows_generic_banner() {
        let mut form = CreateBookForm::with_values("Dune", "Herbert", "Desert planet saga");
        form.begin_submit();
        form.finish_submit(&Err(ShelfError::Network("refused".to_string())));
        assert_eq!(
            form.status(),
            &SubmitStatus::Failed("Could not reach the bookshelf server".to_string())
        );
    }

    #[test]
    fn test_no_duplicate_submission_while_submitting() {
        let mut form = CreateBookForm::with_values("Dune", "Herbert", "Desert planet saga");
        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());
        assert!(form.begin_submit().is_none());
        assert!(form.is_submitting());
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut form = CreateBookForm::new();
        assert!(form.begin_submit().is_none());
        assert!(form.errors().get(BookField::Title).is_some());

        form.push_char(BookField::Title, 'D');
        assert!(form.errors().get(BookField::Title).is_none());
        assert!(form.errors().get(BookField::Author).is_some());
    }
}
