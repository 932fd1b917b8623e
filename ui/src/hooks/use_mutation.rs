use std::future::Future;
use std::rc::Rc;

use payloads::ClientError;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Running,
    Success,
    Failure(String),
}

impl MutationStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, MutationStatus::Running)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MutationStatus::Failure(message) => Some(message),
            _ => None,
        }
    }

    /// Status after a call finishes.
    pub fn settle<T>(result: &Result<T, ClientError>) -> Self {
        match result {
            Ok(_) => MutationStatus::Success,
            Err(e) => MutationStatus::Failure(e.to_string()),
        }
    }
}

pub struct MutationHandle<Req, Res> {
    pub status: MutationStatus,
    /// Response of the last successful call.
    pub response: Option<Rc<Res>>,
    trigger: Callback<(Req, Callback<Rc<Res>>)>,
}

impl<Req, Res> MutationHandle<Req, Res> {
    /// Send `request`; `on_success` gets the response if the call works.
    pub fn run(&self, request: Req, on_success: Callback<Rc<Res>>) {
        self.trigger.emit((request, on_success));
    }

    /// The same as [`run`](Self::run), as a callback that can be moved
    /// into other callbacks.
    pub fn trigger(&self) -> Callback<(Req, Callback<Rc<Res>>)> {
        self.trigger.clone()
    }
}

/// Wrap one write call.
///
/// Status goes `Idle -> Running -> Success | Failure`. A failure calls
/// `on_failure` with the error message. Caches are not touched: the caller
/// refetches what it shows once the call succeeds.
#[hook]
pub fn use_mutation<Req, Res, F, Fut>(
    mutate: F,
    on_failure: Callback<String>,
) -> MutationHandle<Req, Res>
where
    Req: 'static,
    Res: 'static,
    F: Fn(Req) -> Fut + 'static,
    Fut: Future<Output = Result<Res, ClientError>> + 'static,
{
    let status = use_state(MutationStatus::default);
    let response = use_state(|| None::<Rc<Res>>);

    // always call the closure from the latest render
    let mutate = Rc::new(mutate);
    let latest = use_mut_ref(|| mutate.clone());
    *latest.borrow_mut() = mutate;

    let trigger = {
        let status = status.clone();
        let response = response.clone();
        Callback::from(
            move |(request, on_success): (Req, Callback<Rc<Res>>)| {
                let status = status.clone();
                let response = response.clone();
                let on_failure = on_failure.clone();
                let mutate = latest.borrow().clone();

                yew::platform::spawn_local(async move {
                    status.set(MutationStatus::Running);
                    let result = mutate(request).await;
                    status.set(MutationStatus::settle(&result));
                    match result {
                        Ok(value) => {
                            let value = Rc::new(value);
                            response.set(Some(value.clone()));
                            on_success.emit(value);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "mutation failed");
                            on_failure.emit(e.to_string());
                        }
                    }
                });
            },
        )
    };

    MutationHandle {
        status: (*status).clone(),
        response: (*response).clone(),
        trigger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn settles_to_success_or_the_error_message() {
        let ok: Result<(), ClientError> = Ok(());
        assert_eq!(MutationStatus::settle(&ok), MutationStatus::Success);

        let rejected: Result<(), ClientError> = Err(ClientError::APIError(
            StatusCode::BAD_REQUEST,
            "Email already exists".into(),
        ));
        let status = MutationStatus::settle(&rejected);
        assert_eq!(status.error(), Some("Email already exists"));
        assert!(!status.is_running());

        let empty: Result<(), ClientError> = Err(ClientError::EmptyResponse);
        assert_eq!(
            MutationStatus::settle(&empty).error(),
            Some("The server sent an empty response")
        );
    }
}
