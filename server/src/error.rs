use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        match self.0.current_context() {
            KernelError::Conflict | KernelError::Concurrency => {
                tracing::debug!("{:?}", self.0);
                StatusCode::CONFLICT
            }
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::InvalidArgument => {
                tracing::debug!("{:?}", self.0);
                StatusCode::BAD_REQUEST
            }
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => {
                tracing::error!("{:?}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
        .into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::KernelError;

    use crate::error::ErrorStatus;

    fn status(error: KernelError) -> StatusCode {
        ErrorStatus::from(Report::new(error)).into_response().status()
    }

    #[test]
    fn map_kernel_errors() {
        assert_eq!(status(KernelError::Conflict), StatusCode::CONFLICT);
        assert_eq!(status(KernelError::Concurrency), StatusCode::CONFLICT);
        assert_eq!(status(KernelError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(KernelError::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(status(KernelError::Timeout), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            status(KernelError::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
