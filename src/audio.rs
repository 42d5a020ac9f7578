use crate::constants::{ANALYSER_FFT_SIZE, AUDIO_GAIN, AUDIO_URL};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Live analyser feed. Empty until the asset is decoded; every accessor
/// degrades to `None` before that, so the reactive toggle stays a no-op.
pub struct AudioFeed {
    analyser: Option<web::AnalyserNode>,
    bins: Vec<u8>,
}

impl AudioFeed {
    pub fn empty() -> Self {
        Self {
            analyser: None,
            bins: Vec::new(),
        }
    }

    fn install(&mut self, analyser: web::AnalyserNode) {
        self.bins.resize(analyser.frequency_bin_count() as usize, 0);
        self.analyser = Some(analyser);
    }

    /// Refresh the byte-frequency sample and read one bin.
    pub fn sample_bin(&mut self, bin: usize) -> Option<u8> {
        let analyser = self.analyser.as_ref()?;
        analyser.get_byte_frequency_data(&mut self.bins);
        self.bins.get(bin).copied()
    }
}

/// Fetch the audio asset with a progress callback, decode it and start
/// looping playback through gain and analyser nodes. Must be called from a
/// user gesture so the context is allowed to run. Failures log and leave
/// the feed empty.
pub fn begin_load(feed: Rc<RefCell<AudioFeed>>, document: web::Document) {
    let xhr = match web::XmlHttpRequest::new() {
        Ok(x) => x,
        Err(e) => {
            log::error!("XmlHttpRequest error: {:?}", e);
            return;
        }
    };
    if let Err(e) = xhr.open("GET", AUDIO_URL) {
        log::error!("audio request open error: {:?}", e);
        return;
    }
    xhr.set_response_type(web::XmlHttpRequestResponseType::Arraybuffer);

    {
        let document = document.clone();
        let onprogress = Closure::wrap(Box::new(move |ev: web::ProgressEvent| {
            if ev.length_computable() {
                let pct = (ev.loaded() / ev.total().max(1.0) * 100.0) as u32;
                crate::overlay::set_progress(&document, pct);
            }
        }) as Box<dyn FnMut(_)>);
        xhr.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));
        onprogress.forget();
    }
    {
        let xhr_done = xhr.clone();
        let onload = Closure::wrap(Box::new(move || {
            let buffer: js_sys::ArrayBuffer = match xhr_done.response() {
                Ok(v) => match v.dyn_into() {
                    Ok(b) => b,
                    Err(_) => {
                        log::error!("audio response was not an ArrayBuffer");
                        return;
                    }
                },
                Err(e) => {
                    log::error!("audio response error: {:?}", e);
                    return;
                }
            };
            let feed = feed.clone();
            let document = document.clone();
            spawn_local(async move {
                if let Err(e) = decode_and_play(feed, buffer, &document).await {
                    log::error!("audio decode error: {:?}", e);
                }
            });
        }) as Box<dyn FnMut()>);
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
    }
    if let Err(e) = xhr.send() {
        log::error!("audio request send error: {:?}", e);
    }
}

async fn decode_and_play(
    feed: Rc<RefCell<AudioFeed>>,
    buffer: js_sys::ArrayBuffer,
    document: &web::Document,
) -> Result<(), JsValue> {
    let ctx = web::AudioContext::new()?;
    _ = ctx.resume();

    let decoded = JsFuture::from(ctx.decode_audio_data(&buffer)?).await?;
    let audio_buffer: web::AudioBuffer = decoded.dyn_into()?;

    let source = ctx.create_buffer_source()?;
    source.set_buffer(Some(&audio_buffer));
    source.set_loop(true);

    let gain = web::GainNode::new(&ctx)?;
    gain.gain().set_value(AUDIO_GAIN);

    let analyser = web::AnalyserNode::new(&ctx)?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);

    source.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&analyser)?;
    analyser.connect_with_audio_node(&ctx.destination())?;
    source.start()?;

    feed.borrow_mut().install(analyser);
    crate::overlay::hide_sound_prompt(document);
    log::info!("[audio] playback started");
    Ok(())
}
