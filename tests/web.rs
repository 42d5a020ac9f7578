#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn canvas_attach_detach_roundtrip() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap();
    let body = document.body().unwrap();

    body.append_child(&canvas).unwrap();
    assert!(canvas.is_connected());

    body.remove_child(&canvas).unwrap();
    assert!(!canvas.is_connected());
}
