use crate::constants::{ICON_TEXTURE_SIZE, MAX_ICON_LAYERS};
use glam::Vec3;
use web_sys as web;

mod helpers;
mod scene;
mod target;

pub use target::FrameTarget;

use scene::{create_scene_resources, SceneResources};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    icon_texture: wgpu::Texture,
    icons_bind_group: wgpu::BindGroup,
    icon_layers: u32,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    /// `path` is the sampled orbit line; `objects` sizes the sprite buffer
    /// and the icon array.
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        path: &[Vec3],
        objects: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Premultiplied so the starfield canvas shows through cleared pixels
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // One sprite per object plus the hover glow
        let scene = create_scene_resources(&device, format, path, objects + 1);

        let icon_layers = (objects as u32).clamp(1, MAX_ICON_LAYERS);
        let (icon_texture, icon_view) = helpers::create_icon_array_device(
            &device,
            "icon_array",
            ICON_TEXTURE_SIZE,
            icon_layers,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("icon_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let icons_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("icons_bg"),
            layout: &scene.icons_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&icon_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&linear_sampler),
                },
            ],
        });
        log::info!(
            "[gpu] surface {}x{} {:?}, {} icon layers",
            width,
            height,
            format,
            icon_layers
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            icon_texture,
            icons_bind_group,
            icon_layers,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn icon_layers(&self) -> u32 {
        self.icon_layers
    }

    /// Copy one rasterised icon (RGBA, `ICON_TEXTURE_SIZE` square) into its
    /// array layer. Returns false when the layer or data size is wrong.
    pub fn upload_icon(&self, layer: u32, rgba: &[u8]) -> bool {
        let expected = (ICON_TEXTURE_SIZE * ICON_TEXTURE_SIZE * 4) as usize;
        if layer >= self.icon_layers || rgba.len() != expected {
            return false;
        }
        helpers::write_icon_layer(&self.queue, &self.icon_texture, ICON_TEXTURE_SIZE, layer, rgba);
        true
    }

    /// Acquire the swapchain texture for this frame. A lost or outdated
    /// surface is reconfigured and the frame renders nothing.
    pub fn begin_frame(&mut self) -> FrameTarget<'_, 'a> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => Some(f),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                None
            }
            Err(e) => {
                log::warn!("[gpu] frame skipped: {:?}", e);
                None
            }
        };
        FrameTarget::new(self, frame)
    }
}
