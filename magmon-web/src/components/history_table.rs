use crate::i18n::{fmt_date, t};
use crate::router::{GameQuery, Route};
use magmon_core::model::DeckHistoryItem;
use yew::prelude::*;
use yew_router::prelude::*;

/// `1st`, `2nd`, `3rd`, `4th`, ... `11th`, `21st`.
#[must_use]
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub history: Vec<DeckHistoryItem>,
}

/// Games a deck took part in, newest first as delivered by the API.
#[function_component(HistoryTable)]
pub fn history_table(props: &Props) -> Html {
    if props.history.is_empty() {
        return html! { <p class="muted"><small>{ t("history.empty") }</small></p> };
    }
    html! {
        <table class="history-table">
            <caption class="sr-only">{ t("history.caption") }</caption>
            <thead>
                <tr>
                    <th scope="col">{ t("history.date") }</th>
                    <th scope="col">{ t("history.placement") }</th>
                    <th scope="col">{ t("history.version") }</th>
                    <th scope="col"><span class="sr-only">{ t("history.link") }</span></th>
                </tr>
            </thead>
            <tbody>
                { for props.history.iter().map(|item| {
                    let version = item
                        .version_number
                        .map_or_else(|| "-".to_string(), |n| format!("V{n}"));
                    let placement = item.placement.map_or_else(|| t("common.na"), ordinal);
                    let query = GameQuery { game_id: Some(item.game_id) };
                    html! {
                        <tr key={item.game_id}>
                            <td>{ fmt_date(&item.game_date) }</td>
                            <td>{ placement }</td>
                            <td>{ version }</td>
                            <td>
                                <Link<Route, GameQuery> to={Route::Games} query={Some(query)}>
                                    { t("history.view_game") }
                                </Link<Route, GameQuery>>
                            </td>
                        </tr>
                    }
                }) }
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;
    use yew_router::history::{AnyHistory, MemoryHistory};

    #[function_component(PendingResultHarness)]
    fn pending_result_harness() -> Html {
        let history = vec![DeckHistoryItem {
            game_id: 9,
            game_date: "2025-03-20".into(),
            placement: None,
            version_number: Some(1),
        }];
        html! {
            <Router history={AnyHistory::from(MemoryHistory::new())}>
                <HistoryTable {history} />
            </Router>
        }
    }

    #[test]
    fn games_without_a_result_show_na() {
        let html = block_on(LocalServerRenderer::<PendingResultHarness>::new().render());
        assert!(html.contains("<td>N/A</td>"), "{html}");
        assert!(html.contains("V1"));
        assert!(html.contains("gameId=9"));
    }

    #[test]
    fn ordinals_follow_english_suffixes() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 103, 111]
            .into_iter()
            .map(ordinal)
            .collect();
        assert_eq!(
            got,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "103rd", "111th"]
        );
    }
}
