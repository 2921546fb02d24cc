use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::response::handle_response;
use gymkit_types::{
    CreateRoutineRequest, Routine, SessionResponse, SignInRequest, SignUpRequest,
    UpdateRoutineRequest,
};
use reqwest::header::COOKIE;
use reqwest::redirect::Policy;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy)]
enum Operation {
    ListRoutines,
    GetRoutine,
    CreateRoutine,
    UpdateRoutine,
    DeleteRoutine,
    SignUp,
    SignIn,
    GetSession,
    SignOut,
}

impl Operation {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::ListRoutines => "Failed to fetch routines",
            Self::GetRoutine => "Failed to fetch routine",
            Self::CreateRoutine => "Failed to create routine",
            Self::UpdateRoutine => "Failed to update routine",
            Self::DeleteRoutine => "Failed to delete routine",
            Self::SignUp => "Failed to sign up",
            Self::SignIn => "Failed to sign in",
            Self::GetSession => "Failed to fetch session",
            Self::SignOut => "Failed to sign out",
        }
    }

    fn activity(self) -> &'static str {
        match self {
            Self::ListRoutines => "fetching routines",
            Self::GetRoutine => "fetching routine",
            Self::CreateRoutine => "creating routine",
            Self::UpdateRoutine => "updating routine",
            Self::DeleteRoutine => "deleting routine",
            Self::SignUp => "signing up",
            Self::SignIn => "signing in",
            Self::GetSession => "fetching session",
            Self::SignOut => "signing out",
        }
    }
}

pub struct GymClient {
    client: Client,
    config: ClientConfig,
}

impl GymClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        // Redirects are surfaced, not followed: a gate redirect means "sign in".
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn list_routines(&self) -> Result<Vec<Routine>, ClientError> {
        let url = endpoint(&self.config.api_url, &["routines"])?;
        let routines: Option<Vec<Routine>> = self
            .send(self.request(Method::GET, url), Operation::ListRoutines)
            .await?;
        Ok(routines.unwrap_or_default())
    }

    pub async fn get_routine(&self, slug: &str) -> Result<Routine, ClientError> {
        let url = endpoint(&self.config.api_url, &["routines", slug])?;
        self.send_expecting(self.request(Method::GET, url), Operation::GetRoutine)
            .await
    }

    pub async fn create_routine(&self, input: &CreateRoutineRequest) -> Result<Routine, ClientError> {
        let url = endpoint(&self.config.api_url, &["routines"])?;
        let request = self.request(Method::POST, url).json(input);
        self.send_expecting(request, Operation::CreateRoutine).await
    }

    pub async fn update_routine(
        &self,
        slug: &str,
        input: &UpdateRoutineRequest,
    ) -> Result<Routine, ClientError> {
        let url = endpoint(&self.config.api_url, &["routines", slug])?;
        let request = self.request(Method::PATCH, url).json(input);
        self.send_expecting(request, Operation::UpdateRoutine).await
    }

    pub async fn delete_routine(&self, slug: &str) -> Result<(), ClientError> {
        let url = endpoint(&self.config.api_url, &["routines", slug])?;
        let _: Option<IgnoredAny> = self
            .send(self.request(Method::DELETE, url), Operation::DeleteRoutine)
            .await?;
        Ok(())
    }

    pub async fn sign_up(&self, input: &SignUpRequest) -> Result<SessionResponse, ClientError> {
        let url = endpoint(&self.config.auth_url, &["sign-up", "email"])?;
        let request = self.request(Method::POST, url).json(input);
        self.send_expecting(request, Operation::SignUp).await
    }

    pub async fn sign_in(&self, input: &SignInRequest) -> Result<SessionResponse, ClientError> {
        let url = endpoint(&self.config.auth_url, &["sign-in", "email"])?;
        let request = self.request(Method::POST, url).json(input);
        self.send_expecting(request, Operation::SignIn).await
    }

    /// Current session, `None` when signed out or the token has expired.
    pub async fn get_session(&self) -> Result<Option<SessionResponse>, ClientError> {
        let url = endpoint(&self.config.auth_url, &["get-session"])?;
        self.send(self.request(Method::GET, url), Operation::GetSession)
            .await
    }

    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let url = endpoint(&self.config.auth_url, &["sign-out"])?;
        let _: Option<IgnoredAny> = self
            .send(self.request(Method::POST, url), Operation::SignOut)
            .await?;
        Ok(())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.config.session_token {
            Some(token) => builder.header(
                COOKIE,
                format!("{}={}", self.config.session_cookie_name, token),
            ),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: Operation,
    ) -> Result<Option<T>, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!("Transport failure while {}: {}", operation.activity(), e);
            ClientError::Network {
                operation: operation.activity(),
                message: e.to_string(),
            }
        })?;

        Ok(handle_response(response, operation.fallback_message()).await?)
    }

    async fn send_expecting<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: Operation,
    ) -> Result<T, ClientError> {
        self.send(request, operation)
            .await?
            .ok_or(ClientError::EmptyResponse(operation.activity()))
    }
}

/// `base` with `segments` appended, each percent-encoded as one path segment.
///
/// Empty, `.` and `..` segments are rejected: the URL parser would drop or
/// collapse them and address a different resource.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    if let Some(bad) = segments
        .iter()
        .find(|segment| matches!(**segment, "" | "." | ".."))
    {
        return Err(ClientError::Config(format!("invalid path segment {bad:?}")));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::Config(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
