//! # Response Tally
//!
//! Applies one oracle response to a request record held in memory. The
//! caller decides whether to persist the result, so a rejected response
//! (or a failed resolution downstream) never reaches the store.

use fs_01_ledger_state::{OracleRecord, OracleRequestRecord};
use shared_types::{FlightStatus, SuretyError, SuretyResult};

/// Effect of a counted response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyOutcome {
    /// Counted; `votes` distinct oracles now back `status`.
    Counted { status: FlightStatus, votes: usize },
    /// This response completed the quorum for `status`.
    QuorumReached { status: FlightStatus, votes: usize },
}

/// Record `oracle`'s answer on an open `request`.
///
/// Fails with `IndexMismatch` when the oracle holds none of the request's
/// indexes and with `DuplicateResponse` on a second answer, whatever the
/// status. Resolution state is left to the caller.
pub fn record_response(
    request: &mut OracleRequestRecord,
    oracle: &OracleRecord,
    status: FlightStatus,
    min_responses: usize,
) -> SuretyResult<TallyOutcome> {
    if !oracle.matches(&request.indexes) {
        return Err(SuretyError::IndexMismatch);
    }
    if !request.responders.insert(oracle.oracle) {
        return Err(SuretyError::DuplicateResponse);
    }

    request
        .tallies
        .entry(status)
        .or_default()
        .insert(oracle.oracle);
    let votes = request.votes_for(status);

    if votes >= min_responses {
        Ok(TallyOutcome::QuorumReached { status, votes })
    } else {
        Ok(TallyOutcome::Counted { status, votes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fs_01_ledger_state::RequestKey;

    fn request() -> OracleRequestRecord {
        let key = RequestKey {
            airline: [1u8; 20],
            key: [2u8; 32],
            timestamp: 100,
        };
        OracleRequestRecord::open(key, [1, 5, 9], [3u8; 20])
    }

    fn oracle(n: u8, indexes: [u8; 3]) -> OracleRecord {
        OracleRecord {
            oracle: [n; 20],
            indexes,
        }
    }

    #[test]
    fn test_quorum_on_third_matching_answer() {
        let mut req = request();
        let on_time = FlightStatus::OnTime;

        assert_eq!(
            record_response(&mut req, &oracle(1, [1, 2, 3]), on_time, 3),
            Ok(TallyOutcome::Counted { status: on_time, votes: 1 })
        );
        assert_eq!(
            record_response(&mut req, &oracle(2, [0, 5, 6]), on_time, 3),
            Ok(TallyOutcome::Counted { status: on_time, votes: 2 })
        );
        assert_eq!(
            record_response(&mut req, &oracle(3, [7, 8, 9]), on_time, 3),
            Ok(TallyOutcome::QuorumReached { status: on_time, votes: 3 })
        );
    }

    #[test]
    fn test_split_votes_do_not_reach_quorum() {
        let mut req = request();
        let statuses = [
            FlightStatus::OnTime,
            FlightStatus::LateAirline,
            FlightStatus::OnTime,
            FlightStatus::LateWeather,
        ];
        for (n, status) in statuses.into_iter().enumerate() {
            let outcome = record_response(&mut req, &oracle(n as u8, [1, 2, 3]), status, 3);
            assert!(matches!(outcome, Ok(TallyOutcome::Counted { .. })));
        }
        assert_eq!(req.votes_for(FlightStatus::OnTime), 2);
        assert_eq!(req.responders.len(), 4);
    }

    #[test]
    fn test_index_mismatch_not_counted() {
        let mut req = request();
        let result = record_response(&mut req, &oracle(1, [0, 2, 3]), FlightStatus::OnTime, 3);

        assert_eq!(result, Err(SuretyError::IndexMismatch));
        assert!(req.responders.is_empty());
    }

    #[test]
    fn test_duplicate_rejected_even_with_other_status() {
        let mut req = request();
        let o = oracle(1, [1, 2, 3]);
        record_response(&mut req, &o, FlightStatus::OnTime, 3).unwrap();

        assert_eq!(
            record_response(&mut req, &o, FlightStatus::LateAirline, 3),
            Err(SuretyError::DuplicateResponse)
        );
        assert_eq!(req.votes_for(FlightStatus::LateAirline), 0);
    }
}
