//! Bindings to the waveform player object passed in from JavaScript

use wasm_bindgen::prelude::*;

use crate::session::PlaybackHost;

#[wasm_bindgen]
extern "C" {
    /// Any JS object exposing `getDuration`, `getCurrentTime` and `isPlaying`
    pub type WaveformHost;

    #[wasm_bindgen(method, js_name = getDuration)]
    fn get_duration(this: &WaveformHost) -> f64;

    #[wasm_bindgen(method, js_name = getCurrentTime)]
    fn get_current_time(this: &WaveformHost) -> f64;

    #[wasm_bindgen(method, js_name = isPlaying)]
    fn is_playing_js(this: &WaveformHost) -> bool;
}

impl PlaybackHost for WaveformHost {
    fn duration(&self) -> f64 {
        self.get_duration()
    }

    fn current_time(&self) -> f64 {
        self.get_current_time()
    }

    fn is_playing(&self) -> bool {
        self.is_playing_js()
    }
}
