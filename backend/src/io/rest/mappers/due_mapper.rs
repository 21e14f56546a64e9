use crate::domain::commands::dues::DueReport;
use crate::domain::models::MaintenanceDue as DomainMaintenanceDue;
use shared::{DueCalculationResponse, MaintenanceDue as SharedMaintenanceDue};

pub struct DueMapper;

impl DueMapper {
    pub fn to_dto(domain: DomainMaintenanceDue) -> SharedMaintenanceDue {
        SharedMaintenanceDue {
            user_id: domain.user_id,
            user_name: domain.user_name,
            house_number: domain.house_number,
            last_paid_period_end: domain
                .last_paid_period_end
                .map(|d| d.format("%Y-%m-%d").to_string()),
            overdue_days: domain.overdue_days,
            overdue_months: domain.overdue_months,
            formatted_duration: domain.formatted_duration,
        }
    }

    pub fn report_to_response(report: DueReport) -> DueCalculationResponse {
        DueCalculationResponse {
            users_with_due: report
                .result
                .users_with_due
                .into_iter()
                .map(Self::to_dto)
                .collect(),
            total_overdue_users: report.result.total_overdue_users,
            average_overdue_days: report.result.average_overdue_days,
            as_of: report.as_of.format("%Y-%m-%d").to_string(),
        }
    }
}
