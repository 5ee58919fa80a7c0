use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    BidProcessingState, BidState, CommentState, DonationDomain, DonorVisibility, ReadState,
    RequestedVisibility, TransactionState,
};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::events::create_event,
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::events::update_event,
        handlers::events::create_speedrun,
        handlers::events::list_speedruns,
        handlers::events::update_speedrun,
        handlers::donors::create_donor,
        handlers::donors::list_donors,
        handlers::donors::get_donor,
        handlers::donors::update_donor,
        handlers::bids::create_bid,
        handlers::bids::get_bid,
        handlers::bids::update_bid,
        handlers::bids::set_bid_state,
        handlers::bids::rename_bid,
        handlers::bids::reparent_bid,
        handlers::bids::add_suggestion,
        handlers::bids::list_suggestions,
        handlers::bids::list_bids,
        handlers::donations::create_donation,
        handlers::donations::list_donations,
        handlers::donations::get_donation,
        handlers::donations::update_donation,
        handlers::donations::add_donation_bid,
        handlers::donations::add_prize_ticket,
        handlers::prizes::create_prize,
        handlers::prizes::get_prize,
        handlers::prizes::update_prize,
        handlers::prizes::list_prizes,
        handlers::prizes::eligible_donors,
        handlers::prizes::draw_prize,
        handlers::prizes::list_winners,
        handlers::prizes::create_category,
        handlers::prizes::list_categories,
        handlers::feed::upcoming_runs,
        handlers::feed::upcoming_bids,
        handlers::feed::recent_donations,
        handlers::feed::event_total,
    ),
    components(
        schemas(
            Currency,
            EventScopedQuery,
            CreateEventRequest,
            UpdateEventRequest,
            EventResponse,
            CreateSpeedrunRequest,
            UpdateSpeedrunRequest,
            SpeedrunResponse,
            DonorVisibility,
            CreateDonorRequest,
            UpdateDonorRequest,
            DonorResponse,
            BidState,
            CreateBidRequest,
            UpdateBidRequest,
            SetBidStateRequest,
            RenameBidRequest,
            ReparentBidRequest,
            BidResponse,
            CreateBidSuggestionRequest,
            BidSuggestionResponse,
            DonationDomain,
            TransactionState,
            BidProcessingState,
            ReadState,
            CommentState,
            RequestedVisibility,
            CreateDonationRequest,
            UpdateDonationRequest,
            DonationQuery,
            DonationResponse,
            CreateDonationBidRequest,
            DonationBidResponse,
            CreatePrizeTicketRequest,
            PrizeTicketResponse,
            CreatePrizeCategoryRequest,
            PrizeCategoryResponse,
            CreatePrizeRequest,
            UpdatePrizeRequest,
            PrizeResponse,
            EligibleDonorResponse,
            DrawRequest,
            DrawResponse,
            PrizeWinnerResponse,
            UpcomingRunEntry,
            UpcomingBidEntry,
            BidOptionEntry,
            RecentDonationEntry,
            EventTotalResponse,
        )
    ),
    tags(
        (name = "events", description = "活动与比赛项目管理"),
        (name = "donors", description = "捐赠者管理"),
        (name = "bids", description = "竞价树管理"),
        (name = "donations", description = "捐赠与分配管理"),
        (name = "prizes", description = "奖品配置与抽奖"),
        (name = "feed", description = "公共播报数据")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
