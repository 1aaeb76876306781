/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Recording [GL] and [Combiner] implementations for the renderer's tests.

use super::{Combiner, Renderer};
use crate::gles::gles2_raw as gl;
use crate::gles::gles2_raw::types::*;
use crate::gles::{ProcLoader, Vertex, VertexBatch, GL};
use crate::options::Options;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Enable(GLenum),
    Disable(GLenum),
    BlendFunc(GLenum, GLenum),
    CullFace(GLenum),
    DepthFunc(GLenum),
    DepthMask(GLboolean),
    PolygonOffset(GLfloat, GLfloat),
    Scissor(GLint, GLint, GLsizei, GLsizei),
    Viewport(GLint, GLint, GLsizei, GLsizei),
    ClearDepthf(GLfloat),
    Clear(GLbitfield),
    GenTextures(Vec<GLuint>),
    DeleteTextures(Vec<GLuint>),
    ActiveTexture(GLenum),
    BindTexture(GLenum, GLuint),
    TexParameteri(GLenum, GLenum, GLint),
    TexImage2D(GLsizei, GLsizei, Vec<u8>),
    DrawVertices(GLenum, Vec<Vertex>, bool),
    DrawBatch(usize),
}

/// What the mock context looks like, shared with the test.
#[derive(Debug, Default)]
pub struct MockState {
    pub calls: Vec<Call>,
    pub enabled: HashSet<GLenum>,
    pub active_unit: usize,
    pub bound: [GLuint; 8],
    /// Errors `GetError` reports, oldest first.
    pub errors: VecDeque<GLenum>,
    /// Reported once `errors` is empty, like a driver that is stuck.
    pub stuck_error: Option<GLenum>,
    pub get_error_calls: usize,
    next_name: GLuint,
}

impl MockState {
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }
}

pub struct MockGL {
    state: Rc<RefCell<MockState>>,
    extensions: Vec<String>,
}

impl MockGL {
    pub fn with_extensions(extensions: &[&str]) -> (MockGL, Rc<RefCell<MockState>>) {
        let state = Rc::new(RefCell::new(MockState::default()));
        let mock = MockGL {
            state: state.clone(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        };
        (mock, state)
    }

    fn record(&mut self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GL for MockGL {
    fn description() -> &'static str {
        "Mock"
    }
    unsafe fn new(_loader: ProcLoader<'_>) -> Result<Self, String> {
        Ok(Self::with_extensions(&[]).0)
    }
    unsafe fn driver_description(&self) -> String {
        "Mock".to_string()
    }
    unsafe fn IsExtensionSupported(&mut self, name: &str) -> bool {
        self.extensions.iter().any(|ext| ext == name)
    }

    unsafe fn GetError(&mut self) -> GLenum {
        let mut state = self.state.borrow_mut();
        state.get_error_calls += 1;
        state
            .errors
            .pop_front()
            .or(state.stuck_error)
            .unwrap_or(gl::NO_ERROR)
    }
    unsafe fn Enable(&mut self, cap: GLenum) {
        self.state.borrow_mut().enabled.insert(cap);
        self.record(Call::Enable(cap));
    }
    unsafe fn Disable(&mut self, cap: GLenum) {
        self.state.borrow_mut().enabled.remove(&cap);
        self.record(Call::Disable(cap));
    }
    unsafe fn IsEnabled(&mut self, cap: GLenum) -> GLboolean {
        if self.state.borrow().enabled.contains(&cap) {
            gl::TRUE
        } else {
            gl::FALSE
        }
    }

    unsafe fn BlendFunc(&mut self, sfactor: GLenum, dfactor: GLenum) {
        self.record(Call::BlendFunc(sfactor, dfactor));
    }
    unsafe fn CullFace(&mut self, mode: GLenum) {
        self.record(Call::CullFace(mode));
    }
    unsafe fn DepthFunc(&mut self, func: GLenum) {
        self.record(Call::DepthFunc(func));
    }
    unsafe fn DepthMask(&mut self, flag: GLboolean) {
        self.record(Call::DepthMask(flag));
    }
    unsafe fn PolygonOffset(&mut self, factor: GLfloat, units: GLfloat) {
        self.record(Call::PolygonOffset(factor, units));
    }
    unsafe fn Scissor(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Scissor(x, y, width, height));
    }
    unsafe fn Viewport(&mut self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(x, y, width, height));
    }

    unsafe fn ClearDepthf(&mut self, depth: GLfloat) {
        self.record(Call::ClearDepthf(depth));
    }
    unsafe fn Clear(&mut self, mask: GLbitfield) {
        self.record(Call::Clear(mask));
    }

    unsafe fn GenTextures(&mut self, textures: &mut [GLuint]) {
        let mut state = self.state.borrow_mut();
        for texture in textures.iter_mut() {
            state.next_name += 1;
            *texture = state.next_name + 1000;
        }
        state.calls.push(Call::GenTextures(textures.to_vec()));
    }
    unsafe fn DeleteTextures(&mut self, textures: &[GLuint]) {
        self.record(Call::DeleteTextures(textures.to_vec()));
    }
    unsafe fn ActiveTexture(&mut self, texture: GLenum) {
        self.state.borrow_mut().active_unit = (texture - gl::TEXTURE0) as usize;
        self.record(Call::ActiveTexture(texture));
    }
    unsafe fn BindTexture(&mut self, target: GLenum, texture: GLuint) {
        {
            let mut state = self.state.borrow_mut();
            let unit = state.active_unit;
            state.bound[unit] = texture;
        }
        self.record(Call::BindTexture(target, texture));
    }
    unsafe fn TexParameteri(&mut self, target: GLenum, pname: GLenum, param: GLint) {
        self.record(Call::TexParameteri(target, pname, param));
    }
    unsafe fn TexImage2D(
        &mut self,
        _target: GLenum,
        _level: GLint,
        _internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        _format: GLenum,
        _type_: GLenum,
        pixels: &[u8],
    ) {
        self.record(Call::TexImage2D(width, height, pixels.to_vec()));
    }

    unsafe fn DrawVertices(&mut self, mode: GLenum, vertices: &[Vertex], textured: bool) {
        self.record(Call::DrawVertices(mode, vertices.to_vec(), textured));
    }
    unsafe fn DrawBatch(&mut self, batch: &VertexBatch<'_>) {
        self.record(Call::DrawBatch(batch.indices().len()));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CombinerCall {
    AlphaRef(f32),
    Fog(bool),
}

pub struct RecordingCombiner(pub Rc<RefCell<Vec<CombinerCall>>>);

impl Combiner for RecordingCombiner {
    fn set_alpha_ref(&mut self, alpha_ref: f32) {
        self.0.borrow_mut().push(CombinerCall::AlphaRef(alpha_ref));
    }
    fn update_fog(&mut self, enabled: bool) {
        self.0.borrow_mut().push(CombinerCall::Fog(enabled));
    }
}

pub struct TestRenderer {
    pub renderer: Renderer,
    pub gl: Rc<RefCell<MockState>>,
    pub combiner: Rc<RefCell<Vec<CombinerCall>>>,
}

impl TestRenderer {
    /// Construct and initialize a renderer, then forget the calls that made.
    pub fn new(detected_hardware: i32, options: Options) -> TestRenderer {
        let (mock, gl) = MockGL::with_extensions(&["GL_ARB_texture_mirrored_repeat"]);
        let combiner = Rc::new(RefCell::new(Vec::new()));
        let mut renderer = unsafe {
            Renderer::new(
                Box::new(mock),
                Box::new(RecordingCombiner(combiner.clone())),
                detected_hardware,
                options,
            )
        };
        renderer.initialize();
        renderer.init_device_objects();
        gl.borrow_mut().calls.clear();
        combiner.borrow_mut().clear();
        TestRenderer {
            renderer,
            gl,
            combiner,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.gl.borrow_mut().take_calls()
    }
}
