//! OpenGL backend built on [`glow`].

use std::sync::Arc;

use glow::HasContext;

use super::{
    Buffers, Canvas, Filter, FramebufferStatus, FramebufferTarget, Graphics, Ortho, Viewport,
};
use crate::error::{Error, Result};
use crate::views::{Color, Rect, Size};

const FILL_VERTEX_SHADER: &str = r#"#version 330 core
layout(location = 0) in vec2 a_position;
uniform mat4 u_projection;
void main() {
    gl_Position = u_projection * vec4(a_position, 0.0, 1.0);
}
"#;

const FILL_FRAGMENT_SHADER: &str = r#"#version 330 core
uniform vec4 u_color;
out vec4 frag_color;
void main() {
    frag_color = u_color;
}
"#;

type GlProgram = <glow::Context as HasContext>::Program;
type GlShader = <glow::Context as HasContext>::Shader;
type GlUniform = <glow::Context as HasContext>::UniformLocation;
type GlVertexArray = <glow::Context as HasContext>::VertexArray;
type GlBuffer = <glow::Context as HasContext>::Buffer;

/// Program and vertex storage used to draw solid rectangles.
struct FillPipeline {
    program: GlProgram,
    projection: Option<GlUniform>,
    color: Option<GlUniform>,
    vertex_array: GlVertexArray,
    vertex_buffer: GlBuffer,
}

impl FillPipeline {
    fn new(gl: &glow::Context) -> Result<Self> {
        let program = link_program(gl)?;
        unsafe {
            let projection = gl.get_uniform_location(program, "u_projection");
            let color = gl.get_uniform_location(program, "u_color");

            let vertex_array = match gl.create_vertex_array() {
                Ok(vertex_array) => vertex_array,
                Err(err) => {
                    gl.delete_program(program);
                    return Err(Error::CreateBuffer(err));
                }
            };
            let vertex_buffer = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(err) => {
                    gl.delete_vertex_array(vertex_array);
                    gl.delete_program(program);
                    return Err(Error::CreateBuffer(err));
                }
            };

            // The attribute layout is captured by the vertex array.
            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, 0, 0);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                program,
                projection,
                color,
                vertex_array,
                vertex_buffer,
            })
        }
    }

    fn delete(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.vertex_buffer);
            gl.delete_vertex_array(self.vertex_array);
            gl.delete_program(self.program);
        }
    }
}

fn compile_shader(gl: &glow::Context, kind: u32, source: &str) -> Result<GlShader> {
    unsafe {
        let shader = gl.create_shader(kind).map_err(Error::Shader)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let info = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::Shader(info));
        }
        Ok(shader)
    }
}

fn link_program(gl: &glow::Context) -> Result<GlProgram> {
    let vertex = compile_shader(gl, glow::VERTEX_SHADER, FILL_VERTEX_SHADER)?;
    let fragment = match compile_shader(gl, glow::FRAGMENT_SHADER, FILL_FRAGMENT_SHADER) {
        Ok(shader) => shader,
        Err(err) => {
            unsafe { gl.delete_shader(vertex) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(err) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(Error::Shader(err));
            }
        };
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);

        for shader in [vertex, fragment] {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }

        if !linked {
            let info = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(Error::Shader(info));
        }
        Ok(program)
    }
}

/// Two triangles covering `rect` after intersecting it with the viewport's
/// extent, in top-left-origin view coordinates. `None` when nothing is left.
fn quad_vertices(rect: Rect, viewport: Viewport) -> Option<[f32; 12]> {
    let left = rect.left.max(0) as f32;
    let top = rect.top.max(0) as f32;
    let right = rect.right.min(viewport.width) as f32;
    let bottom = rect.bottom.min(viewport.height) as f32;
    if right <= left || bottom <= top {
        return None;
    }

    Some([
        left, top, right, top, left, bottom, // first triangle
        left, bottom, right, top, right, bottom, // second triangle
    ])
}

/// [`Graphics`] implementation issuing real GL calls.
///
/// Requires an OpenGL 3.3 core context or newer.
///
/// # Safety
///
/// The wrapped context must be current on the thread that drives the
/// container for as long as this value is used.
pub struct GlowGraphics {
    gl: Arc<glow::Context>,
    fill: FillPipeline,
    projection: Ortho,
    viewport: Viewport,
}

impl GlowGraphics {
    /// Wrap `gl` and build the program used by [`Canvas::fill_rect`].
    pub fn new(gl: Arc<glow::Context>) -> Result<Self> {
        let fill = FillPipeline::new(&gl)?;
        log::debug!("Fill pipeline ready");
        Ok(Self {
            gl,
            fill,
            projection: Ortho::top_left(Size::default()),
            viewport: Viewport::default(),
        })
    }

    /// The underlying context, for views that issue their own draw calls.
    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }
}

impl Drop for GlowGraphics {
    fn drop(&mut self) {
        self.fill.delete(&self.gl);
    }
}

fn buffer_bits(buffers: Buffers) -> u32 {
    let mut bits = 0;
    if buffers.contains(Buffers::COLOR) {
        bits |= glow::COLOR_BUFFER_BIT;
    }
    if buffers.contains(Buffers::DEPTH) {
        bits |= glow::DEPTH_BUFFER_BIT;
    }
    if buffers.contains(Buffers::STENCIL) {
        bits |= glow::STENCIL_BUFFER_BIT;
    }
    bits
}

fn framebuffer_target(target: FramebufferTarget) -> u32 {
    match target {
        FramebufferTarget::Both => glow::FRAMEBUFFER,
        FramebufferTarget::Read => glow::READ_FRAMEBUFFER,
        FramebufferTarget::Draw => glow::DRAW_FRAMEBUFFER,
    }
}

impl Canvas for GlowGraphics {
    fn projection(&self) -> Ortho {
        self.projection
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(vertices) = quad_vertices(rect, self.viewport) else {
            return;
        };
        let Some(matrix) = self.projection.matrix() else {
            return;
        };

        let fill = &self.fill;
        unsafe {
            self.gl.use_program(Some(fill.program));
            self.gl.uniform_matrix_4_f32_slice(fill.projection.as_ref(), false, &matrix);
            self.gl.uniform_4_f32(fill.color.as_ref(), color.r, color.g, color.b, color.a);

            self.gl.bind_vertex_array(Some(fill.vertex_array));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(fill.vertex_buffer));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&vertices),
                glow::STREAM_DRAW,
            );
            self.gl.draw_arrays(glow::TRIANGLES, 0, 6);

            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_vertex_array(None);
            self.gl.use_program(None);
        }
    }
}

impl Graphics for GlowGraphics {
    type Framebuffer = <glow::Context as HasContext>::Framebuffer;
    type Renderbuffer = <glow::Context as HasContext>::Renderbuffer;

    fn enable_multisample(&mut self) {
        unsafe { self.gl.enable(glow::MULTISAMPLE) };
    }

    fn create_framebuffer(&mut self) -> Result<Self::Framebuffer> {
        unsafe { self.gl.create_framebuffer() }.map_err(Error::CreateFramebuffer)
    }

    fn create_renderbuffer(&mut self) -> Result<Self::Renderbuffer> {
        unsafe { self.gl.create_renderbuffer() }.map_err(Error::CreateRenderbuffer)
    }

    fn delete_framebuffer(&mut self, framebuffer: Self::Framebuffer) {
        unsafe { self.gl.delete_framebuffer(framebuffer) };
    }

    fn delete_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer) {
        unsafe { self.gl.delete_renderbuffer(renderbuffer) };
    }

    fn bind_framebuffer(
        &mut self,
        target: FramebufferTarget,
        framebuffer: Option<Self::Framebuffer>,
    ) {
        unsafe { self.gl.bind_framebuffer(framebuffer_target(target), framebuffer) };
    }

    fn bind_renderbuffer(&mut self, renderbuffer: Option<Self::Renderbuffer>) {
        unsafe { self.gl.bind_renderbuffer(glow::RENDERBUFFER, renderbuffer) };
    }

    fn renderbuffer_storage_multisample(&mut self, samples: i32, size: Size) {
        unsafe {
            self.gl.renderbuffer_storage_multisample(
                glow::RENDERBUFFER,
                samples,
                glow::RGBA8,
                size.width,
                size.height,
            )
        };
    }

    fn attach_color_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::RENDERBUFFER,
                Some(renderbuffer),
            )
        };
    }

    fn framebuffer_status(&mut self) -> FramebufferStatus {
        let status = unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) };
        if status == glow::FRAMEBUFFER_COMPLETE {
            FramebufferStatus::Complete
        } else {
            FramebufferStatus::Incomplete(status)
        }
    }

    fn enable_alpha_blending(&mut self) {
        unsafe {
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn set_projection(&mut self, projection: Ortho) {
        self.projection = projection;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        unsafe { self.gl.viewport(viewport.x, viewport.y, viewport.width, viewport.height) };
    }

    fn set_clear_color(&mut self, color: Color) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) };
    }

    fn clear(&mut self, buffers: Buffers) {
        unsafe { self.gl.clear(buffer_bits(buffers)) };
    }

    fn blit_framebuffer(&mut self, src: Rect, dst: Rect, buffers: Buffers, filter: Filter) {
        let filter = match filter {
            Filter::Nearest => glow::NEAREST,
            Filter::Linear => glow::LINEAR,
        };
        unsafe {
            self.gl.blit_framebuffer(
                src.left,
                src.top,
                src.right,
                src.bottom,
                dst.left,
                dst.top,
                dst.right,
                dst.bottom,
                buffer_bits(buffers),
                filter,
            )
        };
    }

    fn flush(&mut self) {
        unsafe { self.gl.flush() };
    }
}
