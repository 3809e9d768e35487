/// Background page: context-menu actions that move tabs between windows

use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::record::OpenTab;

// Import JS bridge functions
#[wasm_bindgen(module = "/background.js")]
extern "C" {
    fn createContextMenu(id: &str, parent_id: Option<String>, title: &str);

    fn onContextMenuClicked(handler: &js_sys::Function);

    fn onToolbarClicked(handler: &js_sys::Function);

    #[wasm_bindgen(catch)]
    async fn queryTabs(filter: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createWindow() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn moveTabs(tab_ids: JsValue, window_id: i32, index: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str, active: bool) -> Result<(), JsValue>;
}

const MENU_ROOT: &str = "move";
const MENU_MOVE_ONE: &str = "move-one";
const MENU_MOVE_HIGHLIGHTED: &str = "move-highlighted";
const MENU_MOVE_LEFT: &str = "move-left";
const MENU_MOVE_RIGHT: &str = "move-right";

/// Which side of the clicked tab an action takes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PivotSide {
    AtOrBefore,
    AtOrAfter,
}

static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register the menu tree, its click handler, and the toolbar handler.
/// A second call is a no-op so reloads do not trip duplicate-id errors.
pub fn init() {
    if REGISTERED.swap(true, Ordering::SeqCst) {
        return;
    }

    createContextMenu(MENU_ROOT, None, "Move Tabs");
    createContextMenu(MENU_MOVE_LEFT, Some(MENU_ROOT.to_string()), "Move tabs to left");
    createContextMenu(MENU_MOVE_RIGHT, Some(MENU_ROOT.to_string()), "Move tabs to right");
    createContextMenu(MENU_MOVE_ONE, Some(MENU_ROOT.to_string()), "Move this tab");
    createContextMenu(
        MENU_MOVE_HIGHLIGHTED,
        Some(MENU_ROOT.to_string()),
        "Move highlighted tabs",
    );

    let on_click = Closure::wrap(Box::new(|menu_id: String, tab: JsValue| {
        let clicked: OpenTab = match serde_wasm_bindgen::from_value(tab) {
            Ok(tab) => tab,
            Err(err) => {
                log::error!("bad tab payload from context menu: {}", err);
                return;
            }
        };
        spawn_local(async move {
            if let Err(err) = handle_menu_click(&menu_id, clicked).await {
                log::error!("context menu '{}' failed: {:?}", menu_id, err);
            }
        });
    }) as Box<dyn Fn(String, JsValue)>);
    onContextMenuClicked(on_click.as_ref().unchecked_ref());
    on_click.forget();

    let on_toolbar = Closure::wrap(Box::new(|| {
        spawn_local(async {
            if let Err(err) = createTab("tabs.html", true).await {
                log::error!("failed to open saved-tabs page: {:?}", err);
            }
        });
    }) as Box<dyn Fn()>);
    onToolbarClicked(on_toolbar.as_ref().unchecked_ref());
    on_toolbar.forget();
}

async fn handle_menu_click(menu_id: &str, clicked: OpenTab) -> Result<(), JsValue> {
    let tab_ids = match menu_id {
        MENU_MOVE_ONE => vec![clicked.id],
        MENU_MOVE_HIGHLIGHTED => {
            let tabs = query_tabs(serde_json::json!({
                "highlighted": true,
                "windowId": clicked.window_id,
            }))
            .await?;
            tabs.iter().map(|tab| tab.id).collect()
        }
        MENU_MOVE_LEFT | MENU_MOVE_RIGHT => {
            let side = if menu_id == MENU_MOVE_LEFT {
                PivotSide::AtOrAfter
            } else {
                PivotSide::AtOrBefore
            };
            let tabs = query_tabs(serde_json::json!({"windowId": clicked.window_id})).await?;
            tabs_from_pivot(&tabs, clicked.index, side)
        }
        _ => return Ok(()),
    };

    move_to_new_window(tab_ids).await
}

/// Tab ids on one side of the clicked index, the clicked tab included
pub fn tabs_from_pivot(tabs: &[OpenTab], pivot_index: i32, side: PivotSide) -> Vec<i32> {
    tabs.iter()
        .filter(|tab| match side {
            PivotSide::AtOrAfter => tab.index >= pivot_index,
            PivotSide::AtOrBefore => tab.index <= pivot_index,
        })
        .map(|tab| tab.id)
        .collect()
}

async fn query_tabs(filter: serde_json::Value) -> Result<Vec<OpenTab>, JsValue> {
    let filter = serde_wasm_bindgen::to_value(&filter)?;
    let tabs = queryTabs(filter).await?;
    Ok(serde_wasm_bindgen::from_value(tabs)?)
}

async fn move_to_new_window(tab_ids: Vec<i32>) -> Result<(), JsValue> {
    if tab_ids.is_empty() {
        return Ok(());
    }

    let window = createWindow().await?;
    let window_id: i32 = serde_wasm_bindgen::from_value(window)?;
    let ids = serde_wasm_bindgen::to_value(&tab_ids)?;
    moveTabs(ids, window_id, -1).await
}
