use super::helpers::{make_scene_pipeline, PipelineDesc};
use crate::constants::UNIFORM_SLOT_STRIDE;
use crate::core::MAX_WINDOWS;
use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) cam_right: [f32; 4],
    pub(crate) cam_up: [f32; 4],
    pub(crate) backdrop: [f32; 4],
    pub(crate) backdrop_size: [f32; 4],
    pub(crate) light: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteInstance {
    pub(crate) pos_scale: [f32; 4],
    pub(crate) color: [f32; 4],
    /// layer, textured flag, glow flag
    pub(crate) params: [f32; 4],
}

const PATH_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const SPRITE_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4, 2 => Float32x4];

pub(crate) struct SceneResources {
    pub(crate) backdrop_pipeline: wgpu::RenderPipeline,
    pub(crate) path_pipeline: wgpu::RenderPipeline,
    pub(crate) sprite_pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) uniform_bind_group: wgpu::BindGroup,
    pub(crate) icons_bgl: wgpu::BindGroupLayout,
    pub(crate) path_buffer: wgpu::Buffer,
    pub(crate) path_len: u32,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) instance_capacity: usize,
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    path: &[Vec3],
    max_instances: usize,
) -> SceneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let uniform_size = std::mem::size_of::<SceneUniforms>() as u64;
    let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_uniform_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(uniform_size),
            },
            count: None,
        }],
    });
    let icons_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("icons_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2Array,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&uniform_bgl, &icons_bgl],
        push_constant_ranges: &[],
    });

    let backdrop_pipeline = make_scene_pipeline(
        device,
        &pl,
        &shader,
        PipelineDesc {
            label: "backdrop_pipeline",
            vs_entry: "vs_backdrop",
            fs_entry: "fs_backdrop",
            buffers: &[],
            topology: wgpu::PrimitiveTopology::TriangleList,
        },
        color_format,
    );
    let path_pipeline = make_scene_pipeline(
        device,
        &pl,
        &shader,
        PipelineDesc {
            label: "path_pipeline",
            vs_entry: "vs_path",
            fs_entry: "fs_path",
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &PATH_ATTRS,
            }],
            topology: wgpu::PrimitiveTopology::LineStrip,
        },
        color_format,
    );
    let sprite_pipeline = make_scene_pipeline(
        device,
        &pl,
        &shader,
        PipelineDesc {
            label: "sprite_pipeline",
            vs_entry: "vs_sprite",
            fs_entry: "fs_sprite",
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &SPRITE_ATTRS,
            }],
            topology: wgpu::PrimitiveTopology::TriangleList,
        },
        color_format,
    );

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: UNIFORM_SLOT_STRIDE * MAX_WINDOWS as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_uniform_bg"),
        layout: &uniform_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &uniform_buffer,
                offset: 0,
                size: wgpu::BufferSize::new(uniform_size),
            }),
        }],
    });

    let points: Vec<[f32; 3]> = path.iter().map(|p| p.to_array()).collect();
    let path_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("path_vertices"),
        contents: bytemuck::cast_slice(&points),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let instance_capacity = max_instances.max(1);
    let instance_buffer = create_instance_buffer(device, instance_capacity);

    SceneResources {
        backdrop_pipeline,
        path_pipeline,
        sprite_pipeline,
        uniform_buffer,
        uniform_bind_group,
        icons_bgl,
        path_buffer,
        path_len: points.len() as u32,
        instance_buffer,
        instance_capacity,
    }
}

pub(crate) fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sprite_instances"),
        size: (capacity * std::mem::size_of::<SpriteInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
