use actix_web::{HttpResponse, web};

use crate::controller::{pages, players, rounds, score};

/// Every route the club site serves. Static files and the 404 fallback are
/// wired up by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::home))
        .route("/health", web::get().to(HttpResponse::Ok))
        .route("/flights", web::get().to(pages::flights))
        .route("/dress-code", web::get().to(pages::dress_code))
        .route("/local-rules", web::get().to(pages::local_rules))
        .route("/ai-story", web::get().to(pages::ai_story))
        // players
        .route("/register", web::get().to(players::register_form))
        .route("/add_player", web::post().to(players::add_player))
        .route("/players", web::get().to(players::list_players))
        .route("/player/{id}/delete", web::post().to(players::delete_player))
        .route("/player/{id}/update", web::get().to(players::update_player_form))
        .route("/player/{id}/update", web::post().to(players::update_player))
        .route("/player/{id}/scores", web::get().to(players::player_scores))
        .route("/player/{id}/scores", web::post().to(players::record_player_score))
        // scores
        .route("/score/{id}/delete", web::post().to(players::delete_score))
        .route("/scores", web::get().to(score::list_scores))
        .route("/scores/reset", web::post().to(score::reset_scores))
        .route("/admin/db/reset", web::post().to(score::reset_database))
        // rounds
        .route("/rounds", web::get().to(rounds::list_rounds))
        .route("/round/new", web::get().to(rounds::new_round_form))
        .route("/round/new", web::post().to(rounds::add_round))
        .route("/round/{id}/delete", web::post().to(rounds::delete_round))
        .route("/round/{id}/update", web::get().to(rounds::update_round_form))
        .route("/round/{id}/update", web::post().to(rounds::update_round))
        .route("/round/{id}/scores", web::get().to(rounds::scorecard_form))
        .route("/round/{id}/scores", web::post().to(rounds::save_scorecard));
}
