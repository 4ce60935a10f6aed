//! # Airline Admission Flows

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{extra_airline, fund, test_node};
    use shared_types::{AirlineState, CallContext, SuretyError};

    #[tokio::test]
    async fn test_first_four_proposals_auto_approved() {
        let node = test_node().await;
        let ledger = &node.ledger;
        let first = node.accounts.first_airline();
        fund(ledger, first).await;

        for candidate in node.accounts.airlines[1..].iter().copied() {
            let admission = ledger
                .propose_airline(&CallContext::new(first), candidate, "Auto")
                .await
                .unwrap();
            assert!(admission.registered);
            assert!(ledger.is_registered(&candidate).await);
        }
        assert_eq!(ledger.registered_airline_count().await, 5);
    }

    #[tokio::test]
    async fn test_sixth_and_seventh_airline_need_majority() {
        let node = test_node().await;
        let ledger = &node.ledger;
        let airlines = node.accounts.airlines.clone();
        let first = airlines[0];
        fund(ledger, first).await;
        for candidate in airlines[1..].iter().copied() {
            ledger
                .propose_airline(&CallContext::new(first), candidate, "Member")
                .await
                .unwrap();
            fund(ledger, candidate).await;
        }
        assert_eq!(ledger.registered_airline_count().await, 5);

        // 6th airline: proposer's vote plus two more reach ceil(5 / 2) = 3
        let sixth = extra_airline(6);
        let admission = ledger
            .propose_airline(&CallContext::new(first), sixth, "Sixth")
            .await
            .unwrap();
        assert_eq!((admission.votes, admission.required, admission.registered), (1, 3, false));
        ledger
            .vote_for_airline(&CallContext::new(airlines[1]), sixth)
            .await
            .unwrap();
        let admission = ledger
            .vote_for_airline(&CallContext::new(airlines[2]), sixth)
            .await
            .unwrap();
        assert!(admission.registered);

        // 7th airline: six registered now, two votes fall short
        let seventh = extra_airline(7);
        ledger
            .propose_airline(&CallContext::new(first), seventh, "Seventh")
            .await
            .unwrap();
        let admission = ledger
            .vote_for_airline(&CallContext::new(airlines[1]), seventh)
            .await
            .unwrap();
        assert_eq!((admission.votes, admission.required, admission.registered), (2, 3, false));

        assert!(ledger.is_registered(&sixth).await);
        assert!(!ledger.is_registered(&seventh).await);
        assert_eq!(
            ledger.get_airline(&seventh).await.unwrap().state,
            AirlineState::Candidate
        );
        assert_eq!(ledger.registered_airline_count().await, 6);
    }

    #[tokio::test]
    async fn test_unfunded_airline_cannot_participate() {
        let node = test_node().await;
        let ledger = &node.ledger;
        let first = node.accounts.first_airline();

        // registered at genesis but not yet funded
        assert_eq!(
            ledger
                .propose_airline(&CallContext::new(first), extra_airline(1), "Nope")
                .await,
            Err(SuretyError::CallerNotFunded)
        );
        assert!(!ledger.is_airline(&extra_airline(1)).await);
    }

    #[tokio::test]
    async fn test_duplicate_vote_rejected() {
        let node = test_node().await;
        let ledger = &node.ledger;
        let airlines = node.accounts.airlines.clone();
        fund(ledger, airlines[0]).await;
        for candidate in airlines[1..].iter().copied() {
            ledger
                .propose_airline(&CallContext::new(airlines[0]), candidate, "Member")
                .await
                .unwrap();
        }
        fund(ledger, airlines[1]).await;

        let candidate = extra_airline(9);
        ledger
            .propose_airline(&CallContext::new(airlines[0]), candidate, "Pending")
            .await
            .unwrap();
        ledger
            .vote_for_airline(&CallContext::new(airlines[1]), candidate)
            .await
            .unwrap();

        assert_eq!(
            ledger
                .vote_for_airline(&CallContext::new(airlines[1]), candidate)
                .await,
            Err(SuretyError::DuplicateVote)
        );
        assert_eq!(ledger.get_airline(&candidate).await.unwrap().vote_count(), 2);
    }
}
