use crate::domain::models::PaymentPeriod as DomainPaymentPeriod;
use shared::PaymentPeriod as SharedPaymentPeriod;

pub struct PaymentMapper;

impl PaymentMapper {
    /// Unreadable dates map to `None` so the record is treated as having no valid period
    pub fn to_domain(dto: SharedPaymentPeriod) -> DomainPaymentPeriod {
        DomainPaymentPeriod {
            user_id: dto.user_id,
            user_name: dto.user_name,
            house_number: dto.house_number,
            category_id: dto.category_id,
            period_start: dto.period_start.as_deref().and_then(DomainPaymentPeriod::parse_date),
            period_end: dto.period_end.as_deref().and_then(DomainPaymentPeriod::parse_date),
            payment_date: dto.payment_date.as_deref().and_then(DomainPaymentPeriod::parse_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dto(start: Option<&str>, end: Option<&str>) -> SharedPaymentPeriod {
        SharedPaymentPeriod {
            user_id: "u1".to_string(),
            user_name: "Asha".to_string(),
            house_number: "A-101".to_string(),
            category_id: 1,
            period_start: start.map(str::to_string),
            period_end: end.map(str::to_string),
            payment_date: None,
        }
    }

    #[test]
    fn test_to_domain_parses_dates() {
        let domain = PaymentMapper::to_domain(dto(Some("2025-01-01"), Some("2025-01-31T10:00:00Z")));
        assert_eq!(domain.period_start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(domain.period_end, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(domain.payment_date, None);
    }

    #[test]
    fn test_unparsable_dates_become_none() {
        let domain = PaymentMapper::to_domain(dto(Some("01/31/2025"), Some("")));
        assert_eq!(domain.period_start, None);
        assert_eq!(domain.period_end, None);
        assert!(domain.valid_period().is_none());
    }
}
