pub mod aggregate;

pub use aggregate::{
    Application, ApplicationComment, ApplicationCreateDto, ApplicationDetail, ApplicationId,
    ApplicationListParams, ApplicationListResponse, AssignDto, Checklist, ChecklistUpdateDto,
    CommentCreateDto, ContactStatusUpdateDto, ManualApplicationCreateDto, StatusHistoryEntry,
    StatusUpdateDto,
};
