#![forbid(unsafe_code)]

pub mod app_services;
pub mod community_service;
pub mod discussion_service;
pub mod error;
pub mod quests;
pub mod quiz_view;
pub mod what_if_service;

pub use quest_core::Clock;

pub use app_services::AppServices;
pub use community_service::CommunityService;
pub use discussion_service::{ArticleCommentCount, DiscussionService};
pub use error::{AppServicesError, CommunityError, DiscussionError, QuestError};
pub use quests::{
    ProgressStats, QuestFlow, QuestListItem, QuestService, QuestStage, RewardSettings,
};
pub use quiz_view::{OptionMarker, OptionView, QuizAction, QuizView, RangeView, SegmentState};
pub use what_if_service::{MOTIVATIONAL_MESSAGES, WhatIfReport, WhatIfService};
