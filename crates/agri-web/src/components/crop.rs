//! Crop recommendation form

use std::rc::Rc;

use agri_advisor::{Advisor, CropField, CropRequest, CropSuggestion, SoilType};
use agri_core::Notice;
use leptos::prelude::*;

use super::Toasts;

#[component]
fn NumberField(
    request: RwSignal<CropRequest>,
    field: CropField,
    label: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input
                type="number"
                placeholder=placeholder
                prop:value=move || request.with(|r| r.form().get(field).to_string())
                on:input=move |ev| request.update(|r| r.set(field, event_target_value(&ev)))
            />
        </label>
    }
}

#[component]
fn SuggestionCard(suggestion: CropSuggestion) -> impl IntoView {
    view! {
        <div class="suggestion">
            <span class="icon">{suggestion.icon}</span>
            <div>
                <h4>{suggestion.name}</h4>
                <p>{suggestion.description}</p>
            </div>
            <span class="confidence">{suggestion.confidence} "% match"</span>
        </div>
    }
}

#[component]
pub fn CropRecommendation(advisor: StoredValue<Rc<Advisor>, LocalStorage>, toasts: Toasts) -> impl IntoView {
    let request = RwSignal::new(CropRequest::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let query = match request.try_update(CropRequest::submit) {
            Some(Ok(query)) => query,
            Some(Err(e)) => {
                toasts.push(Notice::destructive("Check your input", e.user_message()));
                return;
            }
            None => return,
        };
        let advisor = advisor.get_value();
        leptos::task::spawn_local(async move {
            match advisor.recommend_crops(&query).await {
                Ok(suggestions) => request.update(|r| r.finish(suggestions)),
                Err(e) => {
                    request.update(CropRequest::fail);
                    toasts.push(Notice::destructive("Recommendation failed", e.user_message()));
                }
            }
        });
    };

    let loading = move || request.with(CropRequest::is_loading);

    view! {
        <section id="crop-recommendation" class="crop">
            <span class="badge">"AI Recommendations"</span>
            <h2>"Get Smart Crop Suggestions For Your Land"</h2>
            <p>
                "Our AI analyzes your specific conditions including soil composition, climate patterns, and local market trends to recommend the most profitable and sustainable crops for your farm."
            </p>
            <form class="card" on:submit=submit>
                <label class="field">
                    <span>"Location"</span>
                    <input
                        placeholder="Enter your location"
                        prop:value=move || request.with(|r| r.form().location.clone())
                        on:input=move |ev| request.update(|r| r.set(CropField::Location, event_target_value(&ev)))
                    />
                </label>
                <label class="field">
                    <span>"Soil Type"</span>
                    <select on:change=move |ev| request.update(|r| r.set(CropField::SoilType, event_target_value(&ev)))>
                        <option value="" selected=true disabled=true>"Select soil type"</option>
                        {SoilType::ALL
                            .into_iter()
                            .map(|soil| view! { <option value=soil.value()>{soil.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <NumberField request field=CropField::Temperature label="Avg. Temperature (°C)" placeholder="e.g., 25" />
                <NumberField request field=CropField::Rainfall label="Annual Rainfall (mm)" placeholder="e.g., 750" />
                <NumberField request field=CropField::LandSize label="Land Size (acres)" placeholder="e.g., 5" />
                <button type="submit" class="btn btn-primary" disabled=loading>
                    {move || if loading() { "Analyzing..." } else { "Get Recommendations" }}
                </button>
            </form>

            <div class="results">
                <Show
                    when=loading
                    fallback=move || {
                        view! {
                            <Show
                                when=move || request.with(|r| !r.suggestions().is_empty())
                                fallback=|| view! { <p class="muted">"Fill in your farm details to get personalized crop recommendations."</p> }
                            >
                                <h3>"Recommended Crops"</h3>
                                <For
                                    each=move || request.with(|r| r.suggestions().to_vec())
                                    key=|s| s.name.clone()
                                    children=|suggestion| view! { <SuggestionCard suggestion /> }
                                />
                            </Show>
                        }
                    }
                >
                    <p class="muted">"Analyzing your conditions..."</p>
                </Show>
            </div>
        </section>
    }
}
