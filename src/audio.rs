use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::MIC_FFT_SIZE;
use crate::input;

/// Live microphone feed: an analyser plus the buffer it is read into.
pub struct MicLevel {
    _ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    buf: RefCell<Vec<f32>>,
}

impl MicLevel {
    /// RMS of the latest time-domain block.
    pub fn read_rms(&self) -> f32 {
        let mut buf = self.buf.borrow_mut();
        self.analyser.get_float_time_domain_data(&mut buf);
        input::rms(&buf)
    }
}

/// Ask for microphone access and route it into an analyser (not to the
/// speakers).
pub async fn open_microphone() -> anyhow::Result<MicLevel> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("media devices unavailable: {:?}", e))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&true.into());
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("getUserMedia: {:?}", e))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("microphone denied: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    _ = ctx.resume();
    let source = ctx
        .create_media_stream_source(&stream)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let analyser = web::AnalyserNode::new(&ctx).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    analyser.set_fft_size(MIC_FFT_SIZE);
    _ = source.connect_with_audio_node(&analyser);

    let buf = RefCell::new(vec![0.0; analyser.fft_size() as usize]);
    log::info!("[mic] analyser ready (fft {})", analyser.fft_size());
    Ok(MicLevel {
        _ctx: ctx,
        analyser,
        buf,
    })
}

/// Open the microphone in the background and publish it into `slot`.
pub fn spawn_microphone(slot: Rc<RefCell<Option<MicLevel>>>) {
    if slot.borrow().is_some() {
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        match open_microphone().await {
            Ok(mic) => *slot.borrow_mut() = Some(mic),
            Err(e) => log::error!("[mic] {:?}", e),
        }
    });
}
