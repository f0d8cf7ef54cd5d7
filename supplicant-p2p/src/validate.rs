//! Validity-checked dispatch for RPC objects

use crate::error::InvalidNetwork;
use crate::status::{StatusAnd, SupplicantStatus, SupplicantStatusCode};

/// An RPC object whose backing record may disappear underneath it
pub trait Validate {
    /// Check that the object is still usable, reporting why not if it isn't
    fn check_validity(&self) -> Result<(), InvalidNetwork>;

    fn is_valid(&self) -> bool {
        self.check_validity().is_ok()
    }
}

/// Run `op` against `obj` only if `obj` is still valid
///
/// An invalid object yields `(invalid_code, T::default())` and `op` is not
/// run. Callers cannot tell an invalidated object from one whose record
/// vanished; the cause is only logged. A valid object returns `op`'s result
/// unchanged.
pub fn validate_and_call<O, T, F>(obj: &O, invalid_code: SupplicantStatusCode, op: F) -> StatusAnd<T>
where
    O: Validate + ?Sized,
    T: Default,
    F: FnOnce(&O) -> StatusAnd<T>,
{
    if let Err(reason) = obj.check_validity() {
        tracing::debug!(%reason, code = %invalid_code, "rejecting call on invalid object");
        return (SupplicantStatus::new(invalid_code), T::default());
    }

    op(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Probe {
        valid: Cell<bool>,
        calls: Cell<u32>,
    }

    impl Probe {
        fn new(valid: bool) -> Self {
            Self {
                valid: Cell::new(valid),
                calls: Cell::new(0),
            }
        }

        fn answer(&self) -> StatusAnd<String> {
            self.calls.set(self.calls.get() + 1);
            (SupplicantStatus::ok(), "answer".to_string())
        }
    }

    impl Validate for Probe {
        fn check_validity(&self) -> Result<(), InvalidNetwork> {
            if self.valid.get() {
                Ok(())
            } else {
                Err(InvalidNetwork::Invalidated)
            }
        }
    }

    #[test]
    fn test_valid_object_runs_operation() {
        let probe = Probe::new(true);
        let (status, value) =
            validate_and_call(&probe, SupplicantStatusCode::FailureNetworkInvalid, Probe::answer);

        assert!(status.is_success());
        assert_eq!(value, "answer");
        assert_eq!(probe.calls.get(), 1);
    }

    #[test]
    fn test_invalid_object_short_circuits() {
        let probe = Probe::new(false);
        let (status, value) =
            validate_and_call(&probe, SupplicantStatusCode::FailureIfaceInvalid, Probe::answer);

        assert_eq!(status.code, SupplicantStatusCode::FailureIfaceInvalid);
        assert_eq!(value, String::default());
        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn test_operation_status_passed_through() {
        let probe = Probe::new(true);
        let (status, value): StatusAnd<Vec<u8>> =
            validate_and_call(&probe, SupplicantStatusCode::FailureNetworkInvalid, |_| {
                (
                    SupplicantStatus::with_message(SupplicantStatusCode::FailureUnknown, "busy"),
                    vec![1, 2],
                )
            });

        assert_eq!(status.code, SupplicantStatusCode::FailureUnknown);
        assert_eq!(status.debug_message, "busy");
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn test_unit_result() {
        let probe = Probe::new(false);
        let (status, ()) =
            validate_and_call(&probe, SupplicantStatusCode::FailureNetworkInvalid, |_| {
                (SupplicantStatus::ok(), ())
            });
        assert_eq!(status.code, SupplicantStatusCode::FailureNetworkInvalid);
    }
}
