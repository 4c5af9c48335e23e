//! Domain entities for the database layer

pub mod ad;
pub mod ai;
pub mod analytics;
pub mod automation;
pub mod campaign;
pub mod client;
pub mod dashboard;
pub mod integration;
pub mod invoice;
pub mod notification;
pub mod post;
pub mod preference;
pub mod report;
pub mod reward;
pub mod user;

pub use ad::{Ad, AdStatus, CreateAdRequest, UpdateAdRequest};
pub use ai::{
    AiChat, AiChatMessage, AiChatWithMessages, AiGeneratedContent, ChatRole,
    CreateAiChatRequest, CreateGeneratedContentRequest, GeneratedContentType,
};
pub use analytics::{Analytics, AnalyticsSummary, CreateAnalyticsRequest};
pub use automation::{AutomationRule, CreateAutomationRuleRequest, UpdateAutomationRuleRequest};
pub use campaign::{
    Campaign, CampaignFilter, CampaignStats, CampaignStatus, CreateCampaignRequest,
    UpdateCampaignRequest,
};
pub use client::{Client, ClientStatus, CreateClientRequest, UpdateClientRequest};
pub use dashboard::DashboardSummary;
pub use integration::{CreateIntegrationRequest, SocialMediaIntegration, UpdateIntegrationRequest};
pub use invoice::{
    CreateInvoiceItemRequest, CreateInvoiceRequest, CreatePaymentRequest, Invoice, InvoiceFilter,
    InvoiceItem, InvoiceStatus, InvoiceWithItems, Payment, PaymentStatus, UpdateInvoiceRequest,
    UpdatePaymentRequest,
};
pub use notification::{CreateNotificationRequest, Notification, NotificationType};
pub use post::{
    Comment, CreateCommentRequest, CreatePostRequest, Post, PostFilter, PostStatus,
    UpdatePostRequest,
};
pub use preference::{UpdatePreferenceRequest, UserPreference};
pub use report::{CreateReportRequest, Report};
pub use reward::{CreateRewardRequest, Reward, RewardStatus};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserRole};
