use super::scene::{SceneUniforms, SpriteInstance};
use super::GpuState;
use crate::constants::{CLEAR_RGBA, GLOW_SCALE, GLOW_Z_OFFSET, PATH_LINE_ALPHA, UNIFORM_SLOT_STRIDE};
use crate::core::{
    DeviceRect, OrbitCamera, PassViewport, RenderTarget, SceneSnapshot, Visual, VisualOverrides,
    BACKDROP_HEIGHT, BACKDROP_WIDTH, BACKDROP_Z, MAX_WINDOWS,
};
use smallvec::SmallVec;

/// One frame's worth of GPU work. The router drives it through
/// [`RenderTarget`]; every window draws into the same render pass with its
/// own uniform slot.
pub struct FrameTarget<'g, 'a> {
    gpu: &'g GpuState<'a>,
    frame: Option<wgpu::SurfaceTexture>,
    encoder: Option<wgpu::CommandEncoder>,
    pass: Option<wgpu::RenderPass<'static>>,
    orbit: OrbitCamera,
    glow: f32,
    light: f32,
    instances: u32,
    viewport: Option<PassViewport>,
    overrides: VisualOverrides,
    slot: u64,
}

impl<'g, 'a> FrameTarget<'g, 'a> {
    pub(super) fn new(gpu: &'g GpuState<'a>, frame: Option<wgpu::SurfaceTexture>) -> Self {
        Self {
            gpu,
            frame,
            encoder: None,
            pass: None,
            orbit: OrbitCamera::default(),
            glow: 0.0,
            light: 0.0,
            instances: 0,
            viewport: None,
            overrides: VisualOverrides::NEUTRAL,
            slot: 0,
        }
    }

    /// End the pass, submit and present.
    pub fn finish(mut self) {
        drop(self.pass.take());
        if let (Some(encoder), Some(frame)) = (self.encoder.take(), self.frame.take()) {
            self.gpu.queue.submit(Some(encoder.finish()));
            frame.present();
        }
    }

    fn clamp_to_surface(&self, r: DeviceRect) -> DeviceRect {
        let x = r.x.min(self.gpu.width);
        let y = r.y.min(self.gpu.height);
        DeviceRect {
            x,
            y,
            width: r.width.min(self.gpu.width - x),
            height: r.height.min(self.gpu.height - y),
        }
    }

    fn uniforms(&self, vp: &PassViewport) -> SceneUniforms {
        let camera = self.orbit.camera(vp.aspect());
        let (right, up) = camera.right_up();
        let o = &self.overrides;
        SceneUniforms {
            view_proj: (vp.crop * camera.view_proj()).to_cols_array_2d(),
            cam_right: right.extend(o.ring_scale).to_array(),
            cam_up: up.extend(o.ring_opacity).to_array(),
            backdrop: [
                o.backdrop_offset.x,
                o.backdrop_offset.y,
                o.backdrop_roll,
                o.backdrop_opacity,
            ],
            backdrop_size: [BACKDROP_WIDTH, BACKDROP_HEIGHT, BACKDROP_Z, 0.0],
            light: [self.light, self.glow, 0.0, PATH_LINE_ALPHA],
        }
    }
}

impl RenderTarget for FrameTarget<'_, '_> {
    fn prepare(&mut self, scene: &SceneSnapshot<'_>) {
        self.orbit = scene.orbit.clone();
        self.glow = scene.glow;
        self.light = scene.light;

        let eye = scene.orbit.eye();
        let mut sorted: SmallVec<[(f32, SpriteInstance, Option<SpriteInstance>); 32]> =
            SmallVec::new();
        for obj in scene.objects.iter() {
            let p = obj.position;
            let (color, params) = match obj.visual() {
                Visual::Icon { layer } => ([1.0; 4], [layer as f32, 1.0, 0.0, 0.0]),
                Visual::Fallback { color } => {
                    let [r, g, b] = color.to_array();
                    ([r, g, b, 1.0], [0.0; 4])
                }
            };
            let sprite = SpriteInstance {
                pos_scale: [p.x, p.y, p.z, obj.current_scale],
                color,
                params,
            };
            let glow = (scene.hovered == Some(obj.handle)).then(|| {
                let [r, g, b] = obj.tool.color.to_array();
                SpriteInstance {
                    pos_scale: [p.x, p.y, p.z - GLOW_Z_OFFSET, obj.current_scale * GLOW_SCALE],
                    color: [r, g, b, scene.glow],
                    params: [0.0, 0.0, 1.0, 0.0],
                }
            });
            sorted.push(((p - eye).length_squared(), sprite, glow));
        }
        // No depth buffer: draw back to front
        sorted.sort_by(|a, b| b.0.total_cmp(&a.0));

        let staged: SmallVec<[SpriteInstance; 32]> = sorted
            .iter()
            .flat_map(|(_, sprite, glow)| glow.iter().copied().chain(std::iter::once(*sprite)))
            .take(self.gpu.scene.instance_capacity)
            .collect();
        self.instances = staged.len() as u32;
        if !staged.is_empty() {
            self.gpu.queue.write_buffer(
                &self.gpu.scene.instance_buffer,
                0,
                bytemuck::cast_slice(staged.as_slice()),
            );
        }
    }

    fn clear(&mut self) {
        let Some(frame) = &self.frame else {
            return;
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let [r, g, b, a] = CLEAR_RGBA;
        let pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("windows_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        self.pass = Some(pass);
        self.encoder = Some(encoder);
        self.slot = 0;
    }

    fn set_viewport(&mut self, viewport: &PassViewport) {
        let d = self.clamp_to_surface(viewport.device);
        self.viewport = (!d.is_empty()).then_some(*viewport);
        if let (Some(pass), false) = (self.pass.as_mut(), d.is_empty()) {
            pass.set_viewport(
                d.x as f32,
                d.y as f32,
                d.width as f32,
                d.height as f32,
                0.0,
                1.0,
            );
        }
    }

    fn set_scissor(&mut self, rect: DeviceRect) {
        let d = self.clamp_to_surface(rect);
        if let (Some(pass), false) = (self.pass.as_mut(), d.is_empty()) {
            pass.set_scissor_rect(d.x, d.y, d.width, d.height);
        }
    }

    fn apply_overrides(&mut self, overrides: &VisualOverrides) {
        self.overrides = *overrides;
    }

    fn render(&mut self) {
        let Some(vp) = self.viewport.take() else {
            return;
        };
        if self.pass.is_none() {
            return;
        }
        if self.slot >= MAX_WINDOWS as u64 {
            log::warn!("[gpu] out of uniform slots, window skipped");
            return;
        }
        let offset = self.slot * UNIFORM_SLOT_STRIDE;
        let uniforms = self.uniforms(&vp);
        let gpu = self.gpu;
        gpu.queue
            .write_buffer(&gpu.scene.uniform_buffer, offset, bytemuck::bytes_of(&uniforms));
        self.slot += 1;

        let Some(pass) = self.pass.as_mut() else {
            return;
        };
        pass.set_bind_group(0, &gpu.scene.uniform_bind_group, &[offset as u32]);
        pass.set_bind_group(1, &gpu.icons_bind_group, &[]);

        pass.set_pipeline(&gpu.scene.backdrop_pipeline);
        pass.draw(0..6, 0..1);

        pass.set_pipeline(&gpu.scene.path_pipeline);
        pass.set_vertex_buffer(0, gpu.scene.path_buffer.slice(..));
        pass.draw(0..gpu.scene.path_len, 0..1);

        if self.instances > 0 {
            pass.set_pipeline(&gpu.scene.sprite_pipeline);
            pass.set_vertex_buffer(0, gpu.scene.instance_buffer.slice(..));
            pass.draw(0..6, 0..self.instances);
        }
    }
}
