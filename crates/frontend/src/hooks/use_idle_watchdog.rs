//! Yew integration for the idle watchdog

use crate::watchdog::IdleWatchdog;
use idle_guard_core::WatchdogConfig;
use tracing::error;
use yew::prelude::*;

/// Install an idle watchdog for as long as the calling component is mounted
///
/// A changed `config` tears the old watchdog down and installs a new one.
#[hook]
pub fn use_idle_watchdog(config: WatchdogConfig) {
    use_effect_with(config, |config| {
        let watchdog = match IdleWatchdog::install(config.clone()) {
            Ok(watchdog) => Some(watchdog),
            Err(e) => {
                error!(error = %e, "Failed to install idle watchdog");
                None
            }
        };

        // Cleanup on unmount
        move || drop(watchdog)
    });
}

/// Idle guard props
#[derive(Properties, PartialEq)]
pub struct IdleGuardProps {
    #[prop_or_default]
    pub config: WatchdogConfig,
    pub children: Children,
}

/// Wraps its children with an idle watchdog
#[function_component(IdleGuard)]
pub fn idle_guard(props: &IdleGuardProps) -> Html {
    use_idle_watchdog(props.config.clone());

    html! { <>{ props.children.clone() }</> }
}
