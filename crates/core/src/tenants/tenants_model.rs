//! Tenant domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::periods::Period;

/// A tenancy ("occupant") belonging to one realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub realm_id: String,
    pub name: String,
    /// Lease start date.
    pub begin_date: Option<NaiveDate>,
    /// Contractual lease end date.
    pub end_date: Option<NaiveDate>,
    /// Set once the tenancy has been terminated.
    pub termination_date: Option<NaiveDate>,
}

impl Tenant {
    /// A tenant is active until a termination date is recorded.
    pub fn is_active(&self) -> bool {
        self.termination_date.is_none()
    }

    /// Whether the tenant occupied the premises during `period`.
    ///
    /// The lease must have begun by the end of the period, and a termination
    /// must not fall before the period starts.
    pub fn is_active_in(&self, period: Period) -> bool {
        let started = self
            .begin_date
            .map_or(true, |begin| Period::containing(begin) <= period);
        let not_terminated = self
            .termination_date
            .map_or(true, |terminated| Period::containing(terminated) >= period);
        started && not_terminated
    }
}

/// Realm-wide tenancy counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantOverview {
    pub count_all: usize,
    pub count_active: usize,
    pub count_inactive: usize,
}

impl TenantOverview {
    pub fn from_tenants(tenants: &[Tenant]) -> Self {
        tenants.iter().fold(Self::default(), |mut overview, tenant| {
            overview.count_all += 1;
            if tenant.is_active() {
                overview.count_active += 1;
            } else {
                overview.count_inactive += 1;
            }
            overview
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tenant(begin: Option<NaiveDate>, terminated: Option<NaiveDate>) -> Tenant {
        Tenant {
            id: "t1".to_string(),
            realm_id: "r1".to_string(),
            name: "Jane".to_string(),
            begin_date: begin,
            end_date: None,
            termination_date: terminated,
        }
    }

    #[test]
    fn active_until_terminated() {
        assert!(tenant(None, None).is_active());
        assert!(!tenant(None, Some(date(2024, 3, 31))).is_active());
    }

    #[test]
    fn active_in_period_respects_lease_bounds() {
        let t = tenant(Some(date(2024, 2, 10)), Some(date(2024, 5, 3)));
        assert!(!t.is_active_in(Period::new(1, 2024).unwrap()));
        assert!(t.is_active_in(Period::new(2, 2024).unwrap()));
        assert!(t.is_active_in(Period::new(5, 2024).unwrap()));
        assert!(!t.is_active_in(Period::new(6, 2024).unwrap()));
    }

    #[test]
    fn overview_counts_terminations() {
        let tenants = vec![
            tenant(None, None),
            tenant(None, None),
            tenant(None, Some(date(2023, 1, 1))),
            tenant(None, Some(date(2023, 6, 1))),
            tenant(None, Some(date(2024, 1, 1))),
        ];
        let overview = TenantOverview::from_tenants(&tenants);
        assert_eq!(
            overview,
            TenantOverview {
                count_all: 5,
                count_active: 2,
                count_inactive: 3,
            }
        );
    }

    #[test]
    fn overview_of_empty_realm_is_zero() {
        assert_eq!(TenantOverview::from_tenants(&[]), TenantOverview::default());
    }
}
