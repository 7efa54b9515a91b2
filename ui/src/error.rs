use crate::components::common::{Msg, StatusActivityMsg, StatusHint};
use server::common::StoreError;
use std::fmt::Display;
use std::sync::mpsc::Sender;

/// Application-wide error types for the Mailroom terminal client.
///
/// # Error Categories
///
/// - [`AppError::Store`] - Mailbox/message storage failures
/// - [`AppError::Component`] - Terminal and component lifecycle errors
/// - [`AppError::Config`] - Configuration loading and validation
/// - [`AppError::Channel`] - Event loop communication failures
///
/// Background operations never raise these into the event loop; they travel
/// inside completion values and the controller decides what to show.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Store Error: {0}")]
    Store(String),

    #[error("Component Error: {0}")]
    Component(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Channel Error: {0}")]
    Channel(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub user_message: String,
    pub technical_details: Option<String>,
    pub suggestion: Option<String>,
    pub severity: ErrorSeverity,
}

impl ErrorContext {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            user_message: Self::generate_fallback_message(operation),
            technical_details: None,
            suggestion: None,
            severity: ErrorSeverity::Error,
        }
    }

    fn generate_fallback_message(operation: &str) -> String {
        format!("Could not {}", operation.replace('_', " "))
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.user_message = message.to_string();
        self
    }

    pub fn with_technical_details(mut self, details: &str) -> Self {
        self.technical_details = Some(details.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ContextualError {
    pub error: AppError,
    pub context: ErrorContext,
}

impl ContextualError {
    pub fn new(error: AppError, context: ErrorContext) -> Self {
        Self { error, context }
    }
}

impl Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.context.user_message, self.error)
    }
}

/// Logs errors with their context and turns them into status hints.
///
/// Reporting never stops the application; the event loop decides when to
/// quit.
#[derive(Clone)]
pub struct ErrorReporter {
    tx: Sender<Msg>,
}

impl ErrorReporter {
    pub fn new(tx: Sender<Msg>) -> Self {
        Self { tx }
    }

    pub fn report_simple(&self, error: AppError, component: &str, operation: &str) {
        let context =
            ErrorContext::new(component, operation).with_technical_details(&error.to_string());
        self.report(error, context);
    }

    pub fn report_warning(&self, error: AppError, component: &str, operation: &str) {
        let context = ErrorContext::new(component, operation).with_severity(ErrorSeverity::Warning);
        self.report(error, context);
    }

    pub fn report_critical_and_exit(
        &self,
        error: AppError,
        component: &str,
        operation: &str,
        user_message: &str,
    ) {
        let context = ErrorContext::new(component, operation)
            .with_message(user_message)
            .with_severity(ErrorSeverity::Critical)
            .with_suggestion("The application will terminate. Please fix the issue and restart.");
        self.report(error, context);
    }

    pub fn report(&self, error: AppError, context: ErrorContext) {
        let contextual_error = ContextualError::new(error, context.clone());

        match context.severity {
            ErrorSeverity::Warning => {
                log::warn!(
                    "[{}:{}] {}{}",
                    context.component,
                    context.operation,
                    contextual_error,
                    Self::format_additional_context(&context)
                );
            }
            ErrorSeverity::Error => {
                log::error!(
                    "[{}:{}] {}{}",
                    context.component,
                    context.operation,
                    contextual_error,
                    Self::format_additional_context(&context)
                );
            }
            ErrorSeverity::Critical => {
                log::error!(
                    "[CRITICAL] [{}:{}] {}{}",
                    context.component,
                    context.operation,
                    contextual_error,
                    Self::format_additional_context(&context)
                );
            }
        }

        let hint = match context.severity {
            ErrorSeverity::Warning => StatusHint::warning(context.user_message.clone()),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                StatusHint::error(context.user_message.clone())
            }
        };
        if let Err(e) = self
            .tx
            .send(Msg::StatusActivity(StatusActivityMsg::Show(hint)))
        {
            log::error!("Failed to send status hint: {e}");
        }
    }

    fn format_additional_context(context: &ErrorContext) -> String {
        let mut parts = Vec::new();

        if let Some(ref technical_details) = context.technical_details {
            parts.push(format!("technical: {technical_details}"));
        }

        if let Some(ref suggestion) = context.suggestion {
            parts.push(format!("suggestion: {suggestion}"));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(" [{}]", parts.join("; "))
        }
    }

    // ========== Helper Methods for Common Error Patterns ==========

    pub fn report_send_error(&self, context: &str, error: impl Display) {
        // The channel itself is broken, so only the log can carry this.
        log::error!("[MessageChannel:send_message] Failed to send {context}: {error}");
    }

    pub fn report_store_error(&self, operation: &str, error: &AppError) {
        let context = ErrorContext::new("MailStore", operation)
            .with_message(&format!("Could not {operation}, showing last known data"))
            .with_technical_details(&error.to_string())
            .with_severity(ErrorSeverity::Warning);
        self.report(error.clone(), context);
    }
}
