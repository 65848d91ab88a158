use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

// Events emitted after a state change has committed. Consumers must treat
// them as notifications, not as the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Purchase requisition events
    PurchaseRequisitionCreated(i32),
    PurchaseRequisitionUpdated(i32),
    PurchaseRequisitionDeleted(i32),
    /// Every line item of the requisition is now covered by purchase orders.
    PurchaseRequisitionFullyOrdered(i32),

    // Purchase order events
    PurchaseOrderCreated(i32),

    // Reference data events
    CompanyCreated(i32),
    CompanyUpdated(i32),
    CompanyDeleted(i32),
    ProjectCreated(i32),
    ProjectUpdated(i32),
    ProjectDeleted(i32),
    UserCreated(i32),
    UserUpdated(i32),
    UserDeleted(i32),
}

// Drains the event channel and logs each event. Runs as a background task
// for the lifetime of the server; exits when every sender is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::PurchaseRequisitionFullyOrdered(pr_id) => {
                info!(pr_id, "purchase requisition fully covered by purchase orders");
            }
            Event::PurchaseOrderCreated(po_id) => {
                info!(po_id, "purchase order created");
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);

        sender.send(Event::PurchaseOrderCreated(42)).await.unwrap();

        match rx.recv().await {
            Some(Event::PurchaseOrderCreated(42)) => {}
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_once_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let sender = EventSender::new(tx);

        let result = sender.send(Event::UserDeleted(1)).await;
        assert!(result.is_err());
    }
}
