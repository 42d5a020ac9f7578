use wasm_bindgen::JsCast;
use web_sys as web;

pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let canvas: web::HtmlCanvasElement = el
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    _ = canvas.set_attribute(
        "style",
        "position:fixed;inset:0;width:100%;height:100%;display:block;",
    );
    Ok(canvas)
}

pub fn attach_to_body(document: &web::Document, node: &web::Node) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(node)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

pub fn detach(node: &web::Node) {
    if let Some(parent) = node.parent_node() {
        _ = parent.remove_child(node);
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
