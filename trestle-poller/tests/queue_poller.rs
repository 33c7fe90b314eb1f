mod common;

use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use trestle_core::domain::queue::QueueItem;
use trestle_poller::{BuildRepository, PollError, QueueItemPoller, QueuePollerConfig};

use common::{Call, FakeRepository};

fn poller(repo: &Arc<FakeRepository>, config: QueuePollerConfig) -> QueueItemPoller {
    let repository: Arc<dyn BuildRepository> = repo.clone();
    QueueItemPoller::new(repository, 7, config).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_returns_number_once_scheduled() {
    let repo = FakeRepository::new()
        .queue_item(QueueItem::waiting())
        .queue_item(QueueItem::waiting())
        .queue_item(QueueItem::waiting())
        .queue_item(QueueItem::scheduled(9))
        .into_arc();

    let start = Instant::now();
    let number = poller(&repo, QueuePollerConfig::default())
        .poll(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(number, 9);
    assert_eq!(repo.count(|c| matches!(c, Call::GetQueueItem(7))), 4);
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_item_stops_polling() {
    let repo = FakeRepository::new()
        .queue_item(QueueItem::waiting())
        .queue_item(QueueItem::cancelled())
        .queue_item(QueueItem::scheduled(3))
        .into_arc();

    let err = poller(&repo, QueuePollerConfig::default())
        .poll(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PollError::TriggerCancelled { queue_id: 7 }));
    assert_eq!(repo.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_query_failure_is_not_retried() {
    let repo = FakeRepository::new()
        .queue_item(QueueItem::waiting())
        .queue_failure(503)
        .queue_item(QueueItem::scheduled(3))
        .into_arc();

    let err = poller(&repo, QueuePollerConfig::default())
        .poll(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PollError::GetQueueItem { queue_id: 7, .. }));
    assert!(err.source().unwrap().to_string().contains("503"));
    assert_eq!(repo.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_before_scheduling() {
    let repo = FakeRepository::new()
        .queue_item(QueueItem::waiting())
        .into_arc();
    let config = QueuePollerConfig::default().with_timeout(Duration::from_millis(2500));

    let start = Instant::now();
    let err = poller(&repo, config)
        .poll(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(start.elapsed(), Duration::from_millis(2500));
    assert_eq!(repo.calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_caller_cancellation_wakes_the_delay() {
    let repo = FakeRepository::new()
        .queue_item(QueueItem::waiting())
        .into_arc();
    let config = QueuePollerConfig::default()
        .with_polling_interval(Duration::from_secs(60))
        .with_timeout(Duration::from_secs(600));

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let err = poller(&repo, config).poll(&cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(!err.is_timeout());
    assert!(start.elapsed() < Duration::from_secs(60));
    assert_eq!(repo.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_already_cancelled_token_issues_no_query() {
    let repo = FakeRepository::new()
        .queue_item(QueueItem::scheduled(1))
        .into_arc();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = poller(&repo, QueuePollerConfig::default())
        .poll(&cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(repo.calls().is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let repository: Arc<dyn BuildRepository> = FakeRepository::new().into_arc();
    let config = QueuePollerConfig::default().with_polling_interval(Duration::ZERO);
    assert!(matches!(
        QueueItemPoller::new(repository, 1, config),
        Err(PollError::InvalidConfig(_))
    ));
}
