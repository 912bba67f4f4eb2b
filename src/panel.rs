use globe_core::{LocationRecord, SelectionSink};
use wasm_bindgen::JsValue;
use web_sys as web;

/// The page's details panel: shown with the hovered record, hidden otherwise.
pub struct DetailsPanel {
    document: web::Document,
    element: web::Element,
}

impl DetailsPanel {
    pub fn find(document: &web::Document, element_id: &str) -> Option<Self> {
        let element = document.get_element_by_id(element_id)?;
        Some(Self {
            document: document.clone(),
            element,
        })
    }

    fn show(&self, record: &LocationRecord) {
        self.element.set_text_content(None);
        let lines = [
            ("h3", record.name.clone()),
            ("p", format!("Lat: {:.4}", record.lat)),
            ("p", format!("Lon: {:.4}", record.lon)),
            ("p", format!("Value: {}", record.value)),
        ];
        for (tag, text) in lines {
            if let Ok(el) = self.document.create_element(tag) {
                el.set_text_content(Some(&text));
                _ = self.element.append_child(&el);
            }
        }
        _ = self.element.class_list().add_1("visible");
    }

    fn hide(&self) {
        _ = self.element.class_list().remove_1("visible");
    }
}

impl SelectionSink for DetailsPanel {
    fn selection_changed(&mut self, record: Option<&LocationRecord>) {
        match record {
            Some(r) => self.show(r),
            None => self.hide(),
        }
    }
}

/// Host-supplied JS hover callback. Receives `{id, name, lat, lon, value}` or `null`.
pub struct JsHoverCallback(pub js_sys::Function);

impl SelectionSink for JsHoverCallback {
    fn selection_changed(&mut self, record: Option<&LocationRecord>) {
        let arg = match record {
            Some(r) => record_to_js(r),
            None => JsValue::NULL,
        };
        if let Err(e) = self.0.call1(&JsValue::NULL, &arg) {
            log::error!("on_hover callback threw: {:?}", e);
        }
    }
}

fn record_to_js(record: &LocationRecord) -> JsValue {
    let obj = js_sys::Object::new();
    let fields = [
        ("id", JsValue::from(record.id)),
        ("name", JsValue::from_str(&record.name)),
        ("lat", JsValue::from_f64(record.lat)),
        ("lon", JsValue::from_f64(record.lon)),
        ("value", JsValue::from_f64(record.value)),
    ];
    for (key, value) in fields {
        _ = js_sys::Reflect::set(&obj, &JsValue::from_str(key), &value);
    }
    obj.into()
}

/// Every hover receiver of one mounted globe.
#[derive(Default)]
pub struct HoverSinks {
    pub panel: Option<DetailsPanel>,
    pub callback: Option<JsHoverCallback>,
}

impl SelectionSink for HoverSinks {
    fn selection_changed(&mut self, record: Option<&LocationRecord>) {
        if let Some(panel) = &mut self.panel {
            panel.selection_changed(record);
        }
        if let Some(callback) = &mut self.callback {
            callback.selection_changed(record);
        }
    }
}
