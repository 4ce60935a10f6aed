//! # Flight and Purchase Flows

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{flight_details, fund, test_node};
    use fs_01_ledger_state::flight_key;
    use shared_bus::{EventFilter, EventTopic, SuretyEvent};
    use shared_types::{ether, milli_ether, CallContext, SuretyError, U256};

    #[tokio::test]
    async fn test_bootstrap_fund_register_and_insure() {
        let node = test_node().await;
        let ledger = &node.ledger;
        let airline = node.accounts.first_airline();
        let passenger = node.accounts.passengers[0];
        let mut flights = ledger.subscribe(EventFilter::topics(vec![EventTopic::Flights]));

        assert!(ledger.is_registered(&airline).await);
        fund(ledger, airline).await;
        assert!(ledger.is_funded(&airline).await);

        let flight = ledger
            .register_flight(&CallContext::new(airline), flight_details("AS0330"))
            .await
            .unwrap();
        assert_eq!(flight.nonce, 1);
        assert_eq!(flight.key, flight_key(&airline, 1));

        let event = flights.recv().await.unwrap();
        assert_eq!(
            event,
            SuretyEvent::FlightRegistered {
                airline,
                key: flight.key,
                nonce: 1
            }
        );

        ledger
            .buy_insurance(
                &CallContext::with_value(passenger, milli_ether(833)),
                airline,
                flight.key,
                milli_ether(833),
            )
            .await
            .unwrap();

        let policy = ledger
            .get_passenger_insurance(&airline, &flight.key, &passenger)
            .await
            .unwrap();
        assert_eq!(policy.amount, milli_ether(833));
        assert_eq!(policy.payout, U256::zero());
        assert!(policy.insured);
        assert!(!policy.credited);
        assert!(!policy.withdrawn);
        assert_eq!(
            ledger.get_insured_passengers(&airline, &flight.key).await,
            vec![passenger]
        );
    }

    #[tokio::test]
    async fn test_premium_bounds_and_single_policy() {
        let node = test_node().await;
        let ledger = &node.ledger;
        let airline = node.accounts.first_airline();
        let passenger = node.accounts.passengers[1];
        fund(ledger, airline).await;
        let flight = ledger
            .register_flight(&CallContext::new(airline), flight_details("AS0001"))
            .await
            .unwrap();
        let pay = |amount| CallContext::with_value(passenger, amount);

        assert_eq!(
            ledger
                .buy_insurance(&pay(ether(2)), airline, flight.key, ether(2))
                .await,
            Err(SuretyError::InvalidAmount)
        );
        assert_eq!(
            ledger
                .buy_insurance(&pay(U256::zero()), airline, flight.key, U256::zero())
                .await,
            Err(SuretyError::InvalidAmount)
        );
        ledger
            .buy_insurance(&pay(ether(1)), airline, flight.key, ether(1))
            .await
            .unwrap();

        let before = ledger.contract_balance().await;
        assert_eq!(
            ledger
                .buy_insurance(&pay(milli_ether(500)), airline, flight.key, milli_ether(500))
                .await,
            Err(SuretyError::AlreadyInsured)
        );
        assert_eq!(ledger.contract_balance().await, before);
        assert_eq!(
            ledger
                .get_passenger_insurance(&airline, &flight.key, &passenger)
                .await
                .unwrap()
                .amount,
            ether(1)
        );
    }

    #[tokio::test]
    async fn test_flight_nonces_are_sequential() {
        let node = test_node().await;
        let ledger = &node.ledger;
        let airline = node.accounts.first_airline();
        fund(ledger, airline).await;

        for expected in 1..=3u64 {
            let flight = ledger
                .register_flight(&CallContext::new(airline), flight_details("AS0100"))
                .await
                .unwrap();
            assert_eq!(flight.nonce, expected);
            assert_eq!(flight.key, ledger.get_flight_key(&airline, expected));
        }
    }
}
