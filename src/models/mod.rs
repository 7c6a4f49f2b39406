pub mod company;
pub mod shift;
pub mod user;
pub mod vacation;

pub use company::{Company, CompanyInput, DEFAULT_COLOR};
pub use shift::{Shift, ShiftInput, ShiftQuery, ShiftWithWorker};
pub use user::{NewUserRequest, Role, User, UserSummary};
pub use vacation::{Vacation, VacationDecision, VacationInput, VacationStatus, VacationWithWorker};
