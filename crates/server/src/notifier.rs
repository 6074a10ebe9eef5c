use async_trait::async_trait;
use domain::{CoreError, SubjectRef};
use engine::traits::NotificationHook;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct Notification {
    pub owner_id: i64,
    pub actor_id: i64,
    pub subject: SubjectRef,
}

/// Hands reaction notifications to a background worker. Delivery
/// transport is external; the toggle only ever sees the enqueue.
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: mpsc::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotificationHook for ChannelNotifier {
    async fn notify(
        &self,
        owner_id: i64,
        actor_id: i64,
        subject: SubjectRef,
    ) -> Result<(), CoreError> {
        // try_send on purpose: a full queue drops the notification
        // instead of backpressuring the toggle.
        self.tx
            .try_send(Notification { owner_id, actor_id, subject })
            .map_err(|err| CoreError::Store(err.to_string()))
    }
}

pub async fn run_worker(mut rx: mpsc::Receiver<Notification>) {
    while let Some(n) = rx.recv().await {
        tracing::info!(
            owner = n.owner_id,
            actor = n.actor_id,
            subject = %n.subject,
            "reaction notification queued for delivery"
        );
    }
    tracing::debug!("notification channel closed, worker exiting");
}
