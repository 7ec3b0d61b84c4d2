use maud::{Markup, html};

use super::layout::{render_messages, render_page, render_post_button};
use crate::model::{Round, ScorecardLine, format_clock, format_play_date};

#[derive(Debug, Clone, Default)]
pub struct RoundFormValues {
    pub course_name: String,
    pub play_date: String,
    pub tee_time: String,
    pub pick_up: String,
}

impl From<&Round> for RoundFormValues {
    fn from(round: &Round) -> Self {
        Self {
            course_name: round.course_name.clone(),
            play_date: round.play_date.format("%Y-%m-%d").to_string(),
            tee_time: format_clock(round.tee_time),
            pick_up: round.pick_up.clone().unwrap_or_default(),
        }
    }
}

#[must_use]
pub fn render_round_list(rounds: &[Round]) -> Markup {
    let content = html! {
        p { a href="/round/new" { "New round" } }
        @if rounds.is_empty() {
            p { "No rounds scheduled." }
        } @else {
            table class="styled-table" {
                thead {
                    tr {
                        th { "Date" }
                        th { "Tee time" }
                        th { "Course" }
                        th { "Pick-up" }
                        th { "" }
                    }
                }
                tbody {
                    @for round in rounds {
                        tr {
                            td { (format_play_date(round.play_date)) }
                            td { (format_clock(round.tee_time)) }
                            td class="course" { (round.course_name) }
                            td { (round.pick_up.as_deref().unwrap_or("-")) }
                            td class="actions" {
                                a href=(format!("/round/{}/scores", round.id)) { "Scores" }
                                " "
                                a href=(format!("/round/{}/update", round.id)) { "Edit" }
                                " "
                                (render_post_button(
                                    &format!("/round/{}/delete", round.id),
                                    "Delete",
                                    "Delete this round and its scores?",
                                ))
                            }
                        }
                    }
                }
            }
        }
    };
    render_page("Rounds", &content)
}

fn render_round_fields(values: &RoundFormValues) -> Markup {
    html! {
        label for="course_name" { "Course" }
        input type="text" id="course_name" name="course_name" value=(values.course_name);
        label for="play_date" { "Date" }
        input type="date" id="play_date" name="play_date" value=(values.play_date);
        label for="tee_time" { "Tee time" }
        input type="time" id="tee_time" name="tee_time" value=(values.tee_time);
        label for="pick_up" { "Pick-up" }
        input type="text" id="pick_up" name="pick_up" value=(values.pick_up);
    }
}

#[must_use]
pub fn render_add_round(values: &RoundFormValues, error: Option<&str>) -> Markup {
    let content = html! {
        (render_messages(None, error))
        form method="post" action="/round/new" {
            (render_round_fields(values))
            button type="submit" { "Create" }
        }
    };
    render_page("New round", &content)
}

#[must_use]
pub fn render_update_round(round: &Round, values: &RoundFormValues, error: Option<&str>) -> Markup {
    let content = html! {
        (render_messages(None, error))
        form method="post" action=(format!("/round/{}/update", round.id)) {
            (render_round_fields(values))
            button type="submit" { "Save" }
        }
        p { a href="/rounds" { "Back to rounds" } }
    };
    render_page(&format!("Update {}", round.course_name), &content)
}

/// Score entry for every player. Inputs are named `score_<player id>`.
#[must_use]
pub fn render_scorecard(round: &Round, lines: &[ScorecardLine], error: Option<&str>) -> Markup {
    let title = format!(
        "{} {} {}",
        round.course_name,
        format_play_date(round.play_date),
        format_clock(round.tee_time)
    );
    let content = html! {
        (render_messages(None, error))
        @if lines.is_empty() {
            p { "No players registered yet. " a href="/register" { "Register players" } " first." }
        } @else {
            form method="post" action=(format!("/round/{}/scores", round.id)) {
                table class="styled-table" {
                    thead {
                        tr {
                            th { "Player" }
                            th { "Score" }
                        }
                    }
                    tbody {
                        @for line in lines {
                            @let field = format!("score_{}", line.player.id);
                            tr {
                                td { label for=(field) { (line.player.name) } }
                                td {
                                    input type="number" id=(field) name=(field)
                                        value=[line.score];
                                }
                            }
                        }
                    }
                }
                button type="submit" { "Save scores" }
            }
        }
        p { a href="/rounds" { "Back to rounds" } }
    };
    render_page(&title, &content)
}
