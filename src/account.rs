use crate::data::{fetch_account, resolve_load, AccountSetting};
use crate::ViewProps;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement};
use yew::prelude::*;

const NOTIFICATION_SETTING: &str = "Notification";
const DELETE_SETTING: &str = "Delete Account";
const DELETE_PROMPT: &str = "Are you sure you want to permanently delete your account?";

/// How a settings row is presented, decided by its label alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingControl {
    Text(String),
    Toggle { enabled: bool },
    Delete,
}

impl SettingControl {
    pub fn for_setting(setting: &AccountSetting) -> Self {
        match setting.setting.as_str() {
            NOTIFICATION_SETTING => SettingControl::Toggle {
                enabled: setting.current_data == "Yes",
            },
            DELETE_SETTING => SettingControl::Delete,
            _ => SettingControl::Text(setting.current_data.clone()),
        }
    }
}

/// Records a toggle change on the notification row so re-renders keep it.
pub fn set_notification(rows: &mut [AccountSetting], enabled: bool) -> bool {
    let Some(row) = rows
        .iter_mut()
        .find(|row| row.setting == NOTIFICATION_SETTING)
    else {
        return false;
    };
    row.current_data = if enabled { "Yes" } else { "No" }.to_string();
    true
}

pub fn notification_message(enabled: bool) -> String {
    format!(
        "Notifications {}",
        if enabled { "enabled" } else { "disabled" }
    )
}

fn confirm_delete() -> bool {
    let Some(window) = window() else {
        return false;
    };
    match window.confirm_with_message(DELETE_PROMPT) {
        Ok(confirmed) => confirmed,
        Err(err) => {
            warn!("Confirmation dialog failed: {:?}", err);
            false
        }
    }
}

#[function_component(AccountView)]
pub fn account_view(props: &ViewProps) -> Html {
    let settings = use_state(|| None::<Vec<AccountSetting>>);

    {
        let settings = settings.clone();
        let config = props.config.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let outcome = match config.account_url() {
                        Some(url) => Some(fetch_account(&url).await),
                        None => None,
                    };
                    settings.set(Some(resolve_load(
                        "account settings",
                        outcome,
                        &config.fallback.account,
                    )));
                });

                || ()
            },
            (),
        );
    }

    let on_notification = {
        let settings = settings.clone();
        let toaster = props.toaster.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let enabled = input.checked();
            if let Some(mut rows) = (*settings).clone() {
                if set_notification(&mut rows, enabled) {
                    settings.set(Some(rows));
                }
            }
            toaster.notify(&notification_message(enabled));
        })
    };

    let on_delete = {
        let toaster = props.toaster.clone();
        Callback::from(move |_: MouseEvent| {
            if confirm_delete() {
                info!("Account deletion requested");
                toaster.notify("Request to delete account sent");
            }
        })
    };

    match &*settings {
        None => html! { <p class="account-placeholder">{ "Loading settings…" }</p> },
        Some(rows) => html! {
            <div class="setting-list">
                { for rows.iter().map(|row| render_setting(row, &on_notification, &on_delete)) }
            </div>
        },
    }
}

fn render_setting(
    setting: &AccountSetting,
    on_notification: &Callback<Event>,
    on_delete: &Callback<MouseEvent>,
) -> Html {
    let body = match SettingControl::for_setting(setting) {
        SettingControl::Toggle { enabled } => html! {
            <label class="switch">
                <input type="checkbox" checked={enabled} onchange={on_notification.clone()} />
                <span class="slider"></span>
            </label>
        },
        SettingControl::Delete => html! {
            <button class="danger-btn" onclick={on_delete.clone()}>{ DELETE_SETTING }</button>
        },
        SettingControl::Text(value) => html! { { value } },
    };

    html! {
        <article class="post-card" key={setting.id.to_string()}>
            <div class="post-header">
                <div class="post-user">{ &setting.setting }</div>
            </div>
            <div class="post-body">{ body }</div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Id;
    use crate::fallback::sample_account;

    fn row(label: &str, value: &str) -> AccountSetting {
        AccountSetting {
            id: Id::from(1u64),
            setting: label.to_string(),
            current_data: value.to_string(),
        }
    }

    #[test]
    fn notification_row_reflects_current_value() {
        assert_eq!(
            SettingControl::for_setting(&row("Notification", "Yes")),
            SettingControl::Toggle { enabled: true }
        );
        assert_eq!(
            SettingControl::for_setting(&row("Notification", "No")),
            SettingControl::Toggle { enabled: false }
        );
    }

    #[test]
    fn other_rows_dispatch_on_label() {
        assert_eq!(
            SettingControl::for_setting(&row("Delete Account", "")),
            SettingControl::Delete
        );
        assert_eq!(
            SettingControl::for_setting(&row("Email", "picklecloud@gmail.com")),
            SettingControl::Text("picklecloud@gmail.com".to_string())
        );
    }

    #[test]
    fn sample_rows_have_one_toggle_and_one_delete() {
        let controls: Vec<_> = sample_account()
            .iter()
            .map(SettingControl::for_setting)
            .collect();
        assert_eq!(
            controls
                .iter()
                .filter(|c| matches!(c, SettingControl::Toggle { .. }))
                .count(),
            1
        );
        assert_eq!(
            controls
                .iter()
                .filter(|c| **c == SettingControl::Delete)
                .count(),
            1
        );
        assert!(controls.contains(&SettingControl::Toggle { enabled: true }));
    }

    #[test]
    fn toggle_change_sticks_to_row() {
        let mut rows = sample_account();
        assert!(set_notification(&mut rows, false));

        let row = rows.iter().find(|row| row.setting == "Notification").unwrap();
        assert_eq!(row.current_data, "No");
        assert_eq!(
            SettingControl::for_setting(row),
            SettingControl::Toggle { enabled: false }
        );

        assert!(set_notification(&mut rows, true));
        assert_eq!(
            rows.iter()
                .map(SettingControl::for_setting)
                .find(|control| matches!(control, SettingControl::Toggle { .. })),
            Some(SettingControl::Toggle { enabled: true })
        );
    }

    #[test]
    fn toggle_change_without_notification_row() {
        let mut rows = vec![row("Email", "picklecloud@gmail.com")];
        assert!(!set_notification(&mut rows, true));
        assert_eq!(rows[0].current_data, "picklecloud@gmail.com");
    }

    #[test]
    fn notification_messages() {
        assert_eq!(notification_message(true), "Notifications enabled");
        assert!(notification_message(false).ends_with("disabled"));
    }
}
