//! "Upcoming AI features" teaser, rendered with Yew into its mount point.

use crate::config::UPCOMING_AI_ENDPOINT;
use gloo_net::http::Request;
use log::warn;
use serde::Deserialize;
use yew::prelude::*;

/// Body of the upcoming-features endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpcomingFeatures {
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureList {
    Loading,
    Loaded(Vec<String>),
    Unavailable,
}

async fn fetch_upcoming() -> Result<UpcomingFeatures, gloo_net::Error> {
    Request::get(UPCOMING_AI_ENDPOINT).send().await?.json().await
}

#[function_component(UpcomingAi)]
pub fn upcoming_ai() -> Html {
    let list = use_state(|| FeatureList::Loading);

    {
        let list = list.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_upcoming().await {
                    Ok(upcoming) => list.set(FeatureList::Loaded(upcoming.features)),
                    Err(e) => {
                        warn!("Could not load upcoming features: {}", e);
                        list.set(FeatureList::Unavailable);
                    }
                }
            });
            || ()
        });
    }

    render_feature_list(&list)
}

pub fn render_feature_list(list: &FeatureList) -> Html {
    match list {
        FeatureList::Loading => html! {
            <p class="upcoming-ai-loading">{ "Loading…" }</p>
        },
        FeatureList::Loaded(features) => html! {
            <ul class="upcoming-ai-list">
                { features.iter().map(|f| html! { <li>{ f }</li> }).collect::<Html>() }
            </ul>
        },
        FeatureList::Unavailable => html! {},
    }
}
