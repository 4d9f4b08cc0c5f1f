#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::event::{Book, LibraryEvent, LibraryEventType, PublishEvent};
    use crate::Error;
    use futures::future::{self, FutureExt};
    use rdkafka::error::{KafkaError, RDKafkaErrorCode};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    const TOPIC: &str = "library-events";

    fn create_test_event() -> LibraryEvent {
        LibraryEvent {
            library_event_id: Some(123),
            library_event_type: LibraryEventType::New,
            book: Book {
                book_id: Some(456),
                book_name: "Kafka Fundamentals".to_string(),
                book_author: "Dilip".to_string(),
            },
        }
    }

    #[derive(Clone, Copy)]
    enum StubBehavior {
        Deliver {
            partition: i32,
            offset: i64,
            delay: Duration,
        },
        Fail {
            delay: Duration,
        },
        NeverComplete,
    }

    /// Broker double: records every submission and resolves deliveries
    /// according to its configured behavior.
    struct StubSink {
        behavior: StubBehavior,
        submissions: Mutex<Vec<OutboundRecord>>,
    }

    impl StubSink {
        fn new(behavior: StubBehavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                submissions: Mutex::new(Vec::new()),
            })
        }

        fn delivering(partition: i32, offset: i64) -> Arc<Self> {
            Self::new(StubBehavior::Deliver {
                partition,
                offset,
                delay: Duration::ZERO,
            })
        }

        fn delivering_after(partition: i32, offset: i64, delay: Duration) -> Arc<Self> {
            Self::new(StubBehavior::Deliver {
                partition,
                offset,
                delay,
            })
        }

        fn failing() -> Arc<Self> {
            Self::new(StubBehavior::Fail {
                delay: Duration::ZERO,
            })
        }

        fn never_completing() -> Arc<Self> {
            Self::new(StubBehavior::NeverComplete)
        }

        fn submissions(&self) -> Vec<OutboundRecord> {
            self.submissions.lock().unwrap().clone()
        }
    }

    impl BrokerSink for StubSink {
        fn submit(&self, record: OutboundRecord) -> crate::Result<DeliveryFuture> {
            self.submissions.lock().unwrap().push(record);

            match self.behavior {
                StubBehavior::Deliver {
                    partition,
                    offset,
                    delay,
                } => Ok(async move {
                    tokio::time::sleep(delay).await;
                    Ok(Delivery { partition, offset })
                }
                .boxed()),
                StubBehavior::Fail { delay } => Ok(async move {
                    tokio::time::sleep(delay).await;
                    Err(KafkaError::MessageProduction(
                        RDKafkaErrorCode::MessageTimedOut,
                    ))
                }
                .boxed()),
                StubBehavior::NeverComplete => Ok(future::pending().boxed()),
            }
        }
    }

    /// Event whose payload can never be encoded, for the serialization
    /// failure contract.
    struct UnencodableEvent;

    impl serde::Serialize for UnencodableEvent {
        fn serialize<S: serde::Serializer>(
            &self,
            _serializer: S,
        ) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unencodable event"))
        }
    }

    impl PublishEvent for UnencodableEvent {
        fn partition_key(&self) -> Option<String> {
            Some("0".to_string())
        }
    }

    #[tokio::test]
    async fn test_publish_async_returns_without_waiting_for_broker() {
        let sink = StubSink::never_completing();
        let publisher = EventPublisher::new(sink.clone(), TOPIC);

        let started = Instant::now();
        let handle = publisher.publish_async(&create_test_event()).unwrap();
        assert!(started.elapsed() < Duration::from_millis(500));

        assert_eq!(sink.submissions().len(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_publish_async_resolves_delivered_outcome() {
        let sink = StubSink::delivering(2, 17);
        let publisher = EventPublisher::new(sink.clone(), TOPIC);

        let handle = publisher.publish_async(&create_test_event()).unwrap();
        let outcome = handle.await.unwrap();

        match outcome {
            SendOutcome::Delivered(delivery) => {
                assert_eq!(delivery.partition, 2);
                assert_eq!(delivery.offset, 17);
            }
            SendOutcome::Failed(cause) => panic!("unexpected failure: {}", cause),
        }

        let submissions = sink.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].key.as_deref(), Some("123"));
        assert_eq!(submissions[0].topic, TOPIC);
        assert!(submissions[0].payload.contains("Kafka Fundamentals"));
    }

    #[tokio::test]
    async fn test_publish_async_resolves_failed_outcome_without_erroring_caller() {
        let sink = StubSink::failing();
        let publisher = EventPublisher::new(sink, TOPIC);

        // The caller-facing result is Ok; the failure is only observable
        // through the completion outcome.
        let handle = publisher.publish_async(&create_test_event()).unwrap();
        let outcome = handle.await.unwrap();

        assert!(matches!(outcome, SendOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_publish_async_without_event_id_sends_keyless_record() {
        let sink = StubSink::delivering(0, 0);
        let publisher = EventPublisher::new(sink.clone(), TOPIC);

        let mut event = create_test_event();
        event.library_event_id = None;

        let handle = publisher.publish_async(&event).unwrap();
        handle.await.unwrap();

        assert_eq!(sink.submissions()[0].key, None);
    }

    #[tokio::test]
    async fn test_publish_sync_returns_delivery_before_timeout() {
        let sink = StubSink::delivering_after(1, 42, Duration::from_millis(10));
        let publisher = EventPublisher::new(sink, TOPIC);

        let delivery = publisher
            .publish_sync(&create_test_event(), Duration::from_secs(3))
            .await
            .unwrap();

        assert_eq!(delivery.partition, 1);
        assert_eq!(delivery.offset, 42);
    }

    #[tokio::test]
    async fn test_publish_sync_times_out_when_broker_is_slow() {
        let sink = StubSink::delivering_after(1, 42, Duration::from_millis(200));
        let publisher = EventPublisher::new(sink, TOPIC);

        let err = publisher
            .publish_sync(&create_test_event(), Duration::from_millis(20))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_publish_sync_surfaces_broker_failure_as_send_error() {
        let sink = StubSink::failing();
        let publisher = EventPublisher::new(sink, TOPIC);

        let err = publisher
            .publish_sync(&create_test_event(), Duration::from_secs(3))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Send { .. }));
    }

    #[tokio::test]
    async fn test_publish_with_headers_attaches_provenance_header() {
        let sink = StubSink::delivering(0, 0);
        let publisher = EventPublisher::new(sink.clone(), TOPIC);

        let handle = publisher.publish_with_headers(&create_test_event()).unwrap();
        handle.await.unwrap();

        let submissions = sink.submissions();
        assert_eq!(submissions[0].headers.len(), 1);
        assert_eq!(submissions[0].headers[0].name, "event-source");
        assert_eq!(submissions[0].headers[0].value, b"scanner");
    }

    #[tokio::test]
    async fn test_publish_async_sends_record_with_empty_headers() {
        let sink = StubSink::delivering(0, 0);
        let publisher = EventPublisher::new(sink.clone(), TOPIC);

        let handle = publisher.publish_async(&create_test_event()).unwrap();
        handle.await.unwrap();

        assert!(sink.submissions()[0].headers.is_empty());
    }

    #[tokio::test]
    async fn test_serialization_failure_reaches_no_broker() {
        let sink = StubSink::delivering(0, 0);
        let publisher = EventPublisher::new(sink.clone(), TOPIC);

        let err = publisher.publish_async(&UnencodableEvent).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));

        let err = publisher
            .publish_sync(&UnencodableEvent, Duration::from_secs(3))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));

        assert_eq!(sink.submissions().len(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_publishes_resolve_independently() {
        let sink = StubSink::delivering_after(3, 7, Duration::from_millis(10));
        let publisher = EventPublisher::new(sink.clone(), TOPIC);

        let first = publisher.publish_async(&create_test_event()).unwrap();
        let mut second_event = create_test_event();
        second_event.library_event_id = Some(124);
        let second = publisher.publish_async(&second_event).unwrap();

        let (first, second) = tokio::join!(first, second);
        assert!(matches!(first.unwrap(), SendOutcome::Delivered(_)));
        assert!(matches!(second.unwrap(), SendOutcome::Delivered(_)));

        let keys: Vec<_> = sink
            .submissions()
            .iter()
            .map(|record| record.key.clone())
            .collect();
        assert_eq!(keys, vec![Some("123".to_string()), Some("124".to_string())]);
    }

    #[test]
    fn test_completion_handlers_do_not_panic() {
        CompletionHandler::on_success(
            Some("123"),
            "{}",
            &Delivery {
                partition: 2,
                offset: 0,
            },
        );
        CompletionHandler::on_failure(
            None,
            "{}",
            &KafkaError::MessageProduction(RDKafkaErrorCode::MessageTimedOut),
        );
    }
}
