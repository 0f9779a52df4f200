use chrono::{DateTime, Utc};

use toolcrib_core::{DomainError, DomainResult, Entity, IssuanceId, ProductId};

/// One checkout of a product, open until its submission date is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuance {
    id: IssuanceId,
    product_id: ProductId,
    issue_date: DateTime<Utc>,
    submission_date: Option<DateTime<Utc>>,
}

impl Issuance {
    /// A new, open issuance.
    pub fn open(id: IssuanceId, product_id: ProductId, issue_date: DateTime<Utc>) -> Self {
        Self {
            id,
            product_id,
            issue_date,
            submission_date: None,
        }
    }

    /// Rebuild an issuance from a stored row.
    pub fn restore(
        id: IssuanceId,
        product_id: ProductId,
        issue_date: DateTime<Utc>,
        submission_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            product_id,
            issue_date,
            submission_date,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn issue_date(&self) -> DateTime<Utc> {
        self.issue_date
    }

    pub fn submission_date(&self) -> Option<DateTime<Utc>> {
        self.submission_date
    }

    pub fn is_open(&self) -> bool {
        self.submission_date.is_none()
    }

    /// Set the submission date. It can be set only once.
    pub fn close(&mut self, submitted_at: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_open() {
            return Err(DomainError::conflict(format!(
                "issuance {} already submitted",
                self.id
            )));
        }
        self.submission_date = Some(submitted_at);
        Ok(())
    }
}

impl Entity for Issuance {
    type Id = IssuanceId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn open_issuance_has_no_submission_date() {
        let i = Issuance::open(IssuanceId::new(1), ProductId::new(1), at(9));
        assert!(i.is_open());
        assert_eq!(i.issue_date(), at(9));
    }

    #[test]
    fn close_sets_submission_date_once() {
        let mut i = Issuance::open(IssuanceId::new(1), ProductId::new(1), at(9));
        i.close(at(10)).unwrap();
        assert_eq!(i.submission_date(), Some(at(10)));

        let err = i.close(at(11)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(i.submission_date(), Some(at(10)));
    }
}
