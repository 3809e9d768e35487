/// Saved-tabs page: list, select, open, archive, delete

use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::record::{OpenTab, RecordPatch};
use crate::reducer::{TabEvent, TabState};
use crate::store;
use crate::view::{match_open_tabs, selected_records, selection_flags, shown_tabs};

// Import JS bridge functions
#[wasm_bindgen(module = "/tabs.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabsByUrl(urls: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn openTab(url: &str, active: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn closeTabs(tab_ids: JsValue) -> Result<(), JsValue>;
}

#[derive(Clone, PartialEq)]
enum PageState {
    Loading,
    Ready,
    Failed(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let page = use_state(|| PageState::Loading);
    let state = use_reducer(TabState::default);

    // Fetch the full list once on mount
    {
        let page = page.clone();
        let state = state.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match store::fetch_all().await {
                    Ok(records) => {
                        state.dispatch(TabEvent::Load(records));
                        page.set(PageState::Ready);
                    }
                    Err(err) => {
                        page.set(PageState::Failed(err.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let shown = shown_tabs(&state);
    let flags = selection_flags(&shown, &state.selected);

    let on_toggle_one = {
        let state = state.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                state.dispatch(TabEvent::ToggleOne {
                    ids: vec![input.name()],
                    checked: input.checked(),
                });
            }
        })
    };

    let on_toggle_all = {
        let state = state.clone();
        let visible_ids: Vec<String> = shown.iter().map(|record| record.id.clone()).collect();
        let none_selected = !flags.has_some;

        Callback::from(move |_: Event| {
            state.dispatch(TabEvent::ToggleAll {
                visible_ids: visible_ids.clone(),
                none_selected,
            });
        })
    };

    let on_archive_one = {
        let state = state.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                mutate(
                    state.clone(),
                    vec![input.name()],
                    RecordPatch::archived(input.checked()),
                );
            }
        })
    };

    let on_delete_one = {
        let state = state.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                mutate(
                    state.clone(),
                    vec![input.name()],
                    RecordPatch::deleted(input.checked()),
                );
            }
        })
    };

    let on_open_selected = {
        let state = state.clone();
        Callback::from(move |_| {
            // Selected ids without a record are ignored
            let urls: Vec<String> = state
                .selected
                .iter()
                .filter_map(|id| state.records.get(id))
                .map(|record| record.url.clone())
                .collect();

            spawn_local(async move {
                for url in urls {
                    if let Err(err) = openTab(&url, false).await {
                        log::warn!("failed to open {}: {:?}", url, err);
                    }
                }
            });
        })
    };

    let on_archive_selected = {
        let state = state.clone();
        Callback::from(move |_| {
            let ids: Vec<String> = state.selected.iter().cloned().collect();
            mutate(state.clone(), ids, RecordPatch::archived(true));
        })
    };

    let on_delete_selected = {
        let state = state.clone();
        Callback::from(move |_| {
            let ids: Vec<String> = state.selected.iter().cloned().collect();
            mutate(state.clone(), ids, RecordPatch::deleted(true));
        })
    };

    let on_archive_open = {
        let state = state.clone();
        let selected = selected_records(&shown, &state.selected);

        Callback::from(move |_| {
            let state = state.clone();
            let selected = selected.clone();

            spawn_local(async move {
                let urls: Vec<String> = selected.iter().map(|record| record.url.clone()).collect();
                let open = match query_open_tabs(&urls).await {
                    Ok(open) => open,
                    Err(err) => {
                        log::warn!("failed to query open tabs: {:?}", err);
                        return;
                    }
                };

                let (record_ids, tab_ids) = match_open_tabs(&selected, &open);

                if !record_ids.is_empty() {
                    match store::apply_update(record_ids, RecordPatch::archived(true)).await {
                        Ok(updated) => state.dispatch(TabEvent::UpdateMerge(updated)),
                        Err(err) => log::warn!("{}", err),
                    }
                }

                if !tab_ids.is_empty() {
                    if let Err(err) = close_tabs(&tab_ids).await {
                        log::warn!("failed to close tabs: {:?}", err);
                    }
                }
            });
        })
    };

    html! {
        <div class="container">
            <h1 class="main-title">{"Saved Tabs"}</h1>

            {match &*page {
                PageState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"Loading saved tabs..."}</p>
                    </div>
                },
                PageState::Failed(err) => html! {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err.clone()}
                    </Alert>
                },
                PageState::Ready => html! {
                    <>
                        <div class="toolbar">
                            <Button onclick={on_open_selected} variant={ButtonVariant::Secondary}>
                                {"Open"}
                            </Button>
                            <Button onclick={on_archive_selected} variant={ButtonVariant::Secondary}>
                                {"Archive"}
                            </Button>
                            <Button onclick={on_delete_selected} variant={ButtonVariant::Danger}>
                                {"Delete"}
                            </Button>
                            if flags.has_some {
                                <Button onclick={on_archive_open} variant={ButtonVariant::Secondary}>
                                    {"Archive Open"}
                                </Button>
                            }
                        </div>

                        if shown.is_empty() {
                            <div class="empty-state">
                                <p>{"No saved tabs."}</p>
                                <p class="empty-state-hint">{"Collected tabs will show up here."}</p>
                            </div>
                        } else {
                            <table class="tabs-table">
                                <thead>
                                    <tr>
                                        <th class="select-column">
                                            <input
                                                type="checkbox"
                                                checked={flags.has_all}
                                                onchange={on_toggle_all}
                                            />
                                        </th>
                                        <th>{"Archived"}</th>
                                        <th>{"Deleted"}</th>
                                        <th>{"Link"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for shown.iter().map(|record| html! {
                                        <tr key={record.id.clone()}>
                                            <td>
                                                <input
                                                    type="checkbox"
                                                    name={record.id.clone()}
                                                    checked={state.selected.contains(&record.id)}
                                                    onchange={on_toggle_one.clone()}
                                                />
                                            </td>
                                            <td>
                                                <input
                                                    type="checkbox"
                                                    name={record.id.clone()}
                                                    checked={record.archived}
                                                    onchange={on_archive_one.clone()}
                                                />
                                            </td>
                                            <td>
                                                <input
                                                    type="checkbox"
                                                    name={record.id.clone()}
                                                    checked={record.deleted}
                                                    onchange={on_delete_one.clone()}
                                                />
                                            </td>
                                            <td>
                                                <a href={record.url.clone()} target="_blank">
                                                    {&record.title}
                                                </a>
                                            </td>
                                        </tr>
                                    })}
                                </tbody>
                            </table>

                            <div class="footer">
                                {format!("{} tabs shown", shown.len())}
                            </div>
                        }
                    </>
                },
            }}
        </div>
    }
}

// Helper functions

/// Send a patch for `ids` and fold the store's answer back into the state.
/// A failed mutation leaves the state untouched; the store still owns the
/// records, so the gap only shows up in the console.
fn mutate(state: UseReducerHandle<TabState>, ids: Vec<String>, patch: RecordPatch) {
    if ids.is_empty() {
        return;
    }

    spawn_local(async move {
        match store::apply_update(ids, patch).await {
            Ok(updated) => state.dispatch(TabEvent::UpdateMerge(updated)),
            Err(err) => log::warn!("{}", err),
        }
    });
}

async fn query_open_tabs(urls: &[String]) -> Result<Vec<OpenTab>, JsValue> {
    let urls = serde_wasm_bindgen::to_value(urls)?;
    let open = queryTabsByUrl(urls).await?;
    Ok(serde_wasm_bindgen::from_value(open)?)
}

async fn close_tabs(tab_ids: &[i32]) -> Result<(), JsValue> {
    let tab_ids = serde_wasm_bindgen::to_value(tab_ids)?;
    closeTabs(tab_ids).await
}
