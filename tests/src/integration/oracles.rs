//! # Oracle Consensus Flows
//!
//! The coordinator registers every oracle account, watches request events
//! and answers for each matching oracle; quorum settles the flight.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{
        eventually, flight_details, fund, next_matching, node_with, test_node,
    };
    use fs_01_ledger_state::RequestState;
    use fs_05_oracle_coordinator::{CoordinatorConfig, FixedStatusPolicy, OracleCoordinator};
    use node_runtime::NodeConfig;
    use shared_bus::{EventFilter, EventTopic, SuretyEvent};
    use shared_types::{milli_ether, CallContext, FlightStatus, SuretyError, U256};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_quorum_payout_and_withdrawal() {
        let node = test_node().await;
        let ledger = Arc::clone(&node.ledger);
        let airline = node.accounts.first_airline();
        let passengers = node.accounts.passengers[..2].to_vec();
        fund(&ledger, airline).await;
        let flight = ledger
            .register_flight(&CallContext::new(airline), flight_details("AS0777"))
            .await
            .unwrap();
        for (passenger, premium) in passengers.iter().zip([milli_ether(400), milli_ether(1000)]) {
            ledger
                .buy_insurance(
                    &CallContext::with_value(*passenger, premium),
                    airline,
                    flight.key,
                    premium,
                )
                .await
                .unwrap();
        }

        // every oracle reports the airline's fault
        let coordinator = OracleCoordinator::new(
            CoordinatorConfig::new(node.accounts.oracles.clone()),
            Arc::clone(&ledger),
            Arc::new(FixedStatusPolicy(FlightStatus::LateAirline)),
        );
        let report = coordinator.register_oracles().await;
        assert_eq!(report.registered, 30);

        let mut outcomes = ledger.subscribe(EventFilter::all());
        let worker = tokio::spawn(
            coordinator
                .clone()
                .run(ledger.subscribe(EventFilter::topics(vec![EventTopic::Oracles]))),
        );

        let requester = passengers[0];
        let indexes = ledger
            .fetch_flight_status(&CallContext::new(requester), airline, flight.key, 1_700_000_000)
            .await
            .unwrap();

        let info = next_matching(&mut outcomes, |e| {
            matches!(e, SuretyEvent::FlightStatusInfo { .. })
        })
        .await
        .expect("quorum should be reached");
        assert_eq!(
            info,
            SuretyEvent::FlightStatusInfo {
                airline,
                key: flight.key,
                status: FlightStatus::LateAirline
            }
        );

        let request = ledger
            .get_request(airline, flight.key, 1_700_000_000)
            .await
            .unwrap();
        assert_eq!(request.indexes, indexes);
        assert_eq!(request.state, RequestState::Resolved(FlightStatus::LateAirline));
        assert!(request.votes_for(FlightStatus::LateAirline) >= 3);
        assert!(ledger.get_flight(&flight.key).await.unwrap().resolved);

        // 1.5x premiums
        let first = ledger
            .get_passenger_insurance(&airline, &flight.key, &passengers[0])
            .await
            .unwrap();
        assert!(first.credited);
        assert_eq!(first.payout, milli_ether(600));

        let paid = ledger
            .withdraw(&CallContext::new(passengers[1]), flight.key)
            .await
            .unwrap();
        assert_eq!(paid, milli_ether(1500));
        assert_eq!(ledger.get_balance(&passengers[1]).await, milli_ether(1500));
        let second = ledger
            .get_passenger_insurance(&airline, &flight.key, &passengers[1])
            .await
            .unwrap();
        assert!(second.withdrawn);
        assert_eq!(second.payout, U256::zero());
        assert_eq!(
            ledger
                .withdraw(&CallContext::new(passengers[1]), flight.key)
                .await,
            Err(SuretyError::NothingToWithdraw)
        );

        worker.abort();
    }

    #[tokio::test]
    async fn test_on_time_verdict_credits_nothing() {
        let node = test_node().await;
        let ledger = Arc::clone(&node.ledger);
        let airline = node.accounts.first_airline();
        let passenger = node.accounts.passengers[0];
        fund(&ledger, airline).await;
        let flight = ledger
            .register_flight(&CallContext::new(airline), flight_details("AS0010"))
            .await
            .unwrap();
        ledger
            .buy_insurance(
                &CallContext::with_value(passenger, milli_ether(500)),
                airline,
                flight.key,
                milli_ether(500),
            )
            .await
            .unwrap();

        let coordinator = OracleCoordinator::new(
            CoordinatorConfig::new(node.accounts.oracles.clone()),
            Arc::clone(&ledger),
            Arc::new(FixedStatusPolicy(FlightStatus::OnTime)),
        );
        coordinator.register_oracles().await;
        let indexes = ledger
            .fetch_flight_status(&CallContext::new(passenger), airline, flight.key, 5)
            .await
            .unwrap();

        let report = coordinator.handle_request(indexes, airline, flight.key, 5).await;
        assert!(report.matched >= 3);
        assert_eq!(report.rejected, 0);

        let record = ledger.get_flight(&flight.key).await.unwrap();
        assert!(record.resolved);
        assert_eq!(record.status, FlightStatus::OnTime);
        let policy = ledger
            .get_passenger_insurance(&airline, &flight.key, &passenger)
            .await
            .unwrap();
        assert!(!policy.credited);
        assert_eq!(
            ledger.withdraw(&CallContext::new(passenger), flight.key).await,
            Err(SuretyError::NothingToWithdraw)
        );
    }

    #[tokio::test]
    async fn test_failed_submission_does_not_stop_siblings() {
        // quorum out of reach keeps the request open for every submission
        let mut config = NodeConfig::default();
        config.ledger.oracle.min_responses = 100;
        config.oracles.status_seed = Some(3);
        let node = node_with(config).await;
        let ledger = Arc::clone(&node.ledger);
        let airline = node.accounts.first_airline();
        fund(&ledger, airline).await;
        let flight = ledger
            .register_flight(&CallContext::new(airline), flight_details("AS0404"))
            .await
            .unwrap();

        let coordinator = node.coordinator.clone();
        coordinator.register_oracles().await;
        let indexes = ledger
            .fetch_flight_status(&CallContext::new(airline), airline, flight.key, 9)
            .await
            .unwrap();

        // one matching oracle answers on its own first
        let early = coordinator
            .oracles()
            .into_iter()
            .find(|o| o.matches(&indexes))
            .unwrap();
        ledger
            .submit_oracle_response(&CallContext::new(early.address), airline, flight.key, 9, 0)
            .await
            .unwrap();

        let report = coordinator.handle_request(indexes, airline, flight.key, 9).await;

        assert_eq!(report.rejected, 1);
        assert_eq!(report.accepted, report.matched - 1);
        let request = ledger.get_request(airline, flight.key, 9).await.unwrap();
        assert_eq!(request.responders.len(), report.matched);
        assert!(request.is_open());
    }

    #[tokio::test]
    async fn test_coordinator_ignores_request_when_no_oracles() {
        let node = test_node().await;
        let ledger = Arc::clone(&node.ledger);
        let airline = node.accounts.first_airline();
        fund(&ledger, airline).await;
        let flight = ledger
            .register_flight(&CallContext::new(airline), flight_details("AS0500"))
            .await
            .unwrap();

        // nothing registered yet
        let report = node
            .coordinator
            .handle_request([0, 1, 2], airline, flight.key, 1)
            .await;
        assert_eq!(report.matched, 0);

        let registrar = node.coordinator.clone();
        tokio::spawn(async move {
            registrar.register_oracles().await;
        });
        let ledger = &ledger;
        assert!(
            eventually(|| async move { ledger.oracle_count().await == 30 }).await,
            "all oracle accounts registered"
        );
    }
}
