// zoundo-cli/src/commands/notifications.rs
use crate::output::{format_output, print_response, Formattable, OutputFormat, Response};
use anyhow::Result;
use chrono::Local;
use clap::Subcommand;
use zoundo_client::{Notification, ZoundoClient};

#[derive(Subcommand, Clone, Debug)]
pub enum NotificationsCommands {
    /// List notifications
    List {
        /// Only unread notifications
        #[arg(short, long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read {
        /// Notification ID
        id: u64,
    },
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    Delete {
        /// Notification ID
        id: u64,
    },
}

struct NotificationList(Vec<Notification>);

impl Formattable for NotificationList {
    fn to_json(&self) -> String {
        Response::ok(&self.0).to_json()
    }

    fn to_human(&self) -> String {
        if self.0.is_empty() {
            return "No notifications".to_string();
        }
        self.0
            .iter()
            .map(|n| {
                let marker = if n.is_new {
                    console::style("●").cyan().to_string()
                } else {
                    " ".to_string()
                };
                let when = n.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
                format!("{} {:>5}  {}  {}", marker, n.id, when, n.message)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub async fn handle_notifications(
    client: &ZoundoClient,
    cmd: NotificationsCommands,
    format: OutputFormat,
) -> Result<()> {
    let notifications = client.notifications();
    match cmd {
        NotificationsCommands::List { unread } => {
            let mut list = notifications.list(&[]).await?;
            if unread {
                list.retain(|n| n.is_new);
            }
            println!("{}", format_output(&NotificationList(list), format));
        }
        NotificationsCommands::Read { id } => {
            let notification = notifications.read(id, &[]).await?;
            print_response(&Response::ok(notification), format);
        }
        NotificationsCommands::ReadAll => {
            let done = notifications.read_all().await?;
            print_response(&Response::ok(done), format);
        }
        NotificationsCommands::Delete { id } => {
            let done = notifications.delete(id).await?;
            print_response(&Response::ok(done), format);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_human() {
        assert_eq!(NotificationList(vec![]).to_human(), "No notifications");
        assert_eq!(NotificationList(vec![]).to_json(), r#"{"ok":true,"result":[]}"#);
    }

    #[test]
    fn test_list_human_shows_message() {
        let notification: Notification = serde_json::from_value(serde_json::json!({
            "id": 12,
            "message": "Track approved",
            "isNew": false,
            "createdAt": "2024-03-01T10:00:00Z",
        }))
        .unwrap();
        let human = NotificationList(vec![notification]).to_human();
        assert!(human.contains("   12"));
        assert!(human.ends_with("Track approved"));
    }
}
