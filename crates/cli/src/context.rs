//! Per-invocation state: the portal plus the output mode

use crate::output::spinner;
use anyhow::{anyhow, bail};
use portal::{ApiClient, CancelHandle, Portal, ResolveState, RouteDecision, RouteMatch};
use rbac::ANONYMOUS_HOME;
use shared::{ErpConfig, Role, UserProfile};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

pub const NOT_LOGGED_IN: &str = "Not logged in. Run `erp login` first.";

/// Resolve configuration: defaults < file < `ERP_API_BASE_URL` < `--api`
pub fn load_config(file: Option<&Path>, api: Option<&str>) -> anyhow::Result<ErpConfig> {
    let config = match file {
        Some(path) => ErpConfig::from_file(path)?,
        None => ErpConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(url) = api {
        config = config.with_api_base_url(url);
    }
    config.validate()?;
    Ok(config)
}

/// Where Ctrl-C goes: into the request in flight, or out of the process.
///
/// `tokio::signal::ctrl_c` replaces the default SIGINT behaviour for good
/// once registered, so one handler is installed per process and consults
/// this slot on every signal.
#[derive(Debug, Clone, Default)]
pub struct Interrupts {
    active: Arc<Mutex<Option<CancelHandle>>>,
}

/// Exit status of a process stopped by SIGINT
const INTERRUPTED_EXIT: i32 = 130;

impl Interrupts {
    /// Install the process-wide Ctrl-C handler; must run inside the runtime
    pub fn install() -> Self {
        let interrupts = Self::default();
        let handler = interrupts.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if !handler.interrupt() {
                    std::process::exit(INTERRUPTED_EXIT);
                }
            }
        });
        interrupts
    }

    /// Cancel the request in flight; false when nothing was running
    pub fn interrupt(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                debug!("request interrupted");
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.slot().is_some()
    }

    fn arm(&self, handle: CancelHandle) {
        *self.slot() = Some(handle);
    }

    fn disarm(&self) {
        self.slot().take();
    }

    fn slot(&self) -> MutexGuard<'_, Option<CancelHandle>> {
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Await `work` under a spinner; Ctrl-C meanwhile cancels the scope behind `handle`
pub async fn interruptible<F: Future>(interrupts: &Interrupts, label: &str, handle: CancelHandle, work: F) -> F::Output {
    let bar = spinner(label);
    interrupts.arm(handle);
    let output = work.await;
    interrupts.disarm();
    bar.finish_and_clear();
    output
}

pub struct Context {
    pub portal: Portal,
    pub json: bool,
    pub interrupts: Interrupts,
}

impl Context {
    pub fn new(portal: Portal, json: bool) -> Self {
        Self { portal, json, interrupts: Interrupts::default() }
    }

    pub fn with_interrupts(mut self, interrupts: Interrupts) -> Self {
        self.interrupts = interrupts;
        self
    }

    pub fn from_config(config: &ErpConfig, json: bool) -> anyhow::Result<Self> {
        Ok(Self::new(Portal::from_config(config)?, json))
    }

    /// Run one request in a fresh scope with the current credential
    pub async fn call<T, F, Fut>(&mut self, label: &str, request: F) -> anyhow::Result<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = shared::Result<T>>,
    {
        let handle = self.portal.renew_scope(label);
        let client = self.portal.client();
        let result = interruptible(&self.interrupts, label, handle, self.portal.scope().run(request(client))).await;
        Ok(result?)
    }

    /// Signed-in user's profile, fetched once per session
    pub async fn profile(&mut self) -> anyhow::Result<UserProfile> {
        if let Some(profile) = self.portal.profile() {
            return Ok(profile.clone());
        }
        if !self.portal.state().is_authenticated() {
            bail!(NOT_LOGGED_IN);
        }
        let handle = self.portal.renew_scope("profile");
        match interruptible(&self.interrupts, "Loading profile", handle, self.portal.load_profile()).await {
            ResolveState::Ready(profile) => Ok(profile),
            ResolveState::Failed(message) => Err(anyhow!(message)),
            ResolveState::Loading => bail!("Profile is still loading"),
        }
    }

    pub async fn role(&mut self) -> anyhow::Result<Option<Role>> {
        Ok(self.profile().await?.role())
    }

    /// Open the screen at `path`, failing unless it would render
    pub async fn enter(&mut self, path: &str) -> anyhow::Result<RouteMatch> {
        if self.portal.state().is_authenticated() && self.portal.profile().is_none() {
            self.profile().await?;
        }
        match self.portal.open(path) {
            RouteDecision::Render(route) => Ok(route),
            RouteDecision::Redirect(to) if to == ANONYMOUS_HOME => bail!(NOT_LOGGED_IN),
            RouteDecision::Redirect(to) => bail!("'{}' is not available while signed in (goes to {})", path, to),
            RouteDecision::Forbidden(e) => Err(e.into()),
            RouteDecision::NotFound(path) => bail!("No screen at '{}'", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal::MemoryTokenStorage;
    use shared::FailurePolicy;

    fn context() -> Context {
        let portal = Portal::new(&ErpConfig::default(), MemoryTokenStorage::new()).unwrap();
        Context::new(portal, false)
    }

    // ============== Config Tests ==============

    #[test]
    fn test_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("erp.yaml");
        std::fs::write(
            &path,
            "apiBaseUrl: http://files.example.edu\nfailurePolicy: invalidate_on_any_failure\n",
        )
        .unwrap();

        let config = load_config(Some(&path), Some("https://flag.example.edu")).unwrap();
        assert_eq!(config.api_base_url, "https://flag.example.edu");
        assert_eq!(config.failure_policy, FailurePolicy::InvalidateOnAnyFailure);
    }

    #[test]
    fn test_bad_flag_url_rejected() {
        assert!(load_config(None, Some("erp.example.edu")).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.yaml")), None).is_err());
    }

    // ============== Routing Tests ==============

    #[tokio::test]
    async fn test_enter_protected_while_anonymous() {
        let mut ctx = context();
        let err = ctx.enter("/my-result").await.unwrap_err();
        assert_eq!(err.to_string(), NOT_LOGGED_IN);
    }

    #[tokio::test]
    async fn test_enter_public_while_anonymous() {
        let mut ctx = context();
        let route = ctx.enter("/track-application").await.unwrap();
        assert_eq!(route.pattern(), "/track-application");
    }

    #[tokio::test]
    async fn test_enter_unknown_path() {
        let mut ctx = context();
        assert!(ctx.enter("/nowhere").await.unwrap_err().to_string().contains("No screen"));
    }

    // ============== Interrupt Tests ==============

    #[test]
    fn test_interrupt_with_nothing_running() {
        let interrupts = Interrupts::default();
        assert!(!interrupts.interrupt());
    }

    #[tokio::test]
    async fn test_interrupt_cancels_request_in_flight() {
        let interrupts = Interrupts::default();
        let scope = portal::RequestScope::new("timetable");
        let remote = interrupts.clone();

        let result = interruptible(&interrupts, "Loading", scope.handle(), async {
            assert!(remote.is_armed());
            assert!(remote.interrupt());
            scope.run(std::future::pending::<shared::Result<()>>()).await
        })
        .await;

        assert!(matches!(result, Err(shared::ErpError::Cancelled)));
        assert!(!interrupts.is_armed());
        assert!(!interrupts.interrupt());
    }

    #[tokio::test]
    async fn test_interrupts_released_after_request() {
        let mut ctx = context();
        let _ = ctx.call("Loading", |_| async { Ok::<_, shared::ErpError>(1) }).await.unwrap();
        assert!(!ctx.interrupts.is_armed());
    }

    #[tokio::test]
    async fn test_profile_requires_login() {
        let mut ctx = context();
        assert_eq!(ctx.profile().await.unwrap_err().to_string(), NOT_LOGGED_IN);
    }
}
