use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use scrollscape_common::ObjectId;
use scrollscape_scene::{Appearance, Camera, Scene, SceneObject};
use tracing::warn;
use wgpu::util::DeviceExt;

use crate::mesh::{self, MeshKey, Vertex};
use crate::shaders;
use crate::texture::Texture;

/// Ground-grid helper dimensions.
const GRID_SIZE: f32 = 200.0;
const GRID_DIVISIONS: u32 = 50;

/// Light-marker octahedron: 12 edges as a line list.
const MARKER_VERTEX_COUNT: u32 = 24;
const MARKER_RADIUS: f32 = 1.0;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    point_light_pos: [f32; 4],
    /// rgb premultiplied by intensity.
    point_light_color: [f32; 4],
    /// rgb premultiplied by intensity.
    ambient_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    /// x: 1.0 shaded, 0.0 full-bright. y/z/w unused.
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 4],
}

fn instance_data(object: &SceneObject) -> InstanceData {
    let cols = object.transform.matrix().to_cols_array_2d();
    let (color, lit) = match &object.appearance {
        Appearance::Flat(c) => (c.to_rgba(), 1.0),
        Appearance::Textured { lit, .. } => ([1.0, 1.0, 1.0, 1.0], if *lit { 1.0 } else { 0.0 }),
    };
    InstanceData {
        model_0: cols[0],
        model_1: cols[1],
        model_2: cols[2],
        model_3: cols[3],
        color,
        params: [lit, 0.0, 0.0, 0.0],
    }
}

/// Generate ground grid line vertices: a `size` x `size` square on y = 0.
fn grid_lines(size: f32, divisions: u32) -> Vec<LineVertex> {
    let color = [0.4, 0.4, 0.4, 1.0];
    let half = size * 0.5;
    let step = size / divisions as f32;
    let mut verts = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        verts.push(LineVertex {
            position: [-half, 0.0, offset],
            color,
        });
        verts.push(LineVertex {
            position: [half, 0.0, offset],
            color,
        });
        verts.push(LineVertex {
            position: [offset, 0.0, -half],
            color,
        });
        verts.push(LineVertex {
            position: [offset, 0.0, half],
            color,
        });
    }
    verts
}

/// Octahedron wireframe centred on the light, tinted with its colour.
fn light_marker_lines(center: Vec3, color: [f32; 4], radius: f32) -> Vec<LineVertex> {
    let px = center + Vec3::X * radius;
    let nx = center - Vec3::X * radius;
    let py = center + Vec3::Y * radius;
    let ny = center - Vec3::Y * radius;
    let pz = center + Vec3::Z * radius;
    let nz = center - Vec3::Z * radius;
    let edges = [
        (py, px),
        (py, nx),
        (py, pz),
        (py, nz),
        (ny, px),
        (ny, nx),
        (ny, pz),
        (ny, nz),
        (px, pz),
        (pz, nx),
        (nx, nz),
        (nz, px),
    ];
    edges
        .iter()
        .flat_map(|(a, b)| {
            [
                LineVertex {
                    position: a.to_array(),
                    color,
                },
                LineVertex {
                    position: b.to_array(),
                    color,
                },
            ]
        })
        .collect()
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, data: &mesh::MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

fn material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    map: &Texture,
    normal: &Texture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("material_bind_group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&map.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&map.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&normal.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(&normal.sampler),
            },
        ],
    })
}

/// wgpu-based scene renderer.
///
/// Built once from the populated scene: meshes, textures, and bind groups
/// are uploaded here. Per frame it rewrites the globals and instance
/// buffers and records one render pass.
pub struct GpuRenderer {
    object_pipeline: wgpu::RenderPipeline,
    background_pipeline: wgpu::RenderPipeline,
    helper_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    default_material: wgpu::BindGroup,
    materials: BTreeMap<ObjectId, wgpu::BindGroup>,
    background: Option<wgpu::BindGroup>,
    meshes: BTreeMap<MeshKey, GpuMesh>,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    grid_vertex_buffer: wgpu::Buffer,
    grid_vertex_count: u32,
    marker_vertex_buffer: wgpu::Buffer,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    show_helpers: bool,
}

impl GpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        scene: &Scene,
        assets_dir: &Path,
    ) -> Self {
        // Globals buffer
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Material layout: colour map + normal map
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bind_group_layout"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                texture_entry(2),
                sampler_entry(3),
            ],
        });
        let background_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bind_group_layout"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });

        // Object pipeline
        let object_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("object_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::OBJECT_SHADER.into()),
        });

        let object_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("object_pipeline_layout"),
                bind_group_layouts: &[&globals_layout, &material_layout],
                push_constant_ranges: &[],
            });

        let object_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("object_pipeline"),
            layout: Some(&object_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &object_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                            2 => Float32x2,
                            3 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Float32x4,
                            9 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &object_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Background pipeline: fullscreen triangle behind everything
        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BACKGROUND_SHADER.into()),
        });

        let background_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("background_pipeline_layout"),
                bind_group_layouts: &[&background_layout],
                push_constant_ranges: &[],
            });

        let background_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("background_pipeline"),
            layout: Some(&background_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &background_shader,
                entry_point: Some("vs_background"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &background_shader,
                entry_point: Some("fs_background"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Helper pipeline: grid + light marker lines
        let helper_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("helper_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::HELPER_SHADER.into()),
        });

        let helper_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("helper_pipeline_layout"),
                bind_group_layouts: &[&globals_layout],
                push_constant_ranges: &[],
            });

        let helper_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("helper_pipeline"),
            layout: Some(&helper_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &helper_shader,
                entry_point: Some("vs_helper"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &helper_shader,
                entry_point: Some("fs_helper"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Placeholder textures shared by every flat-coloured object
        let white = Texture::white(device, queue);
        let neutral_normal = Texture::neutral_normal(device, queue);
        let default_material = material_bind_group(device, &material_layout, &white, &neutral_normal);

        // Image-mapped objects get their own bind group; failures degrade
        // to the placeholders with a warning.
        let mut materials = BTreeMap::new();
        for (id, object) in scene.objects() {
            if let Appearance::Textured {
                map, normal_map, ..
            } = &object.appearance
            {
                let map_texture =
                    match Texture::from_path(device, queue, &assets_dir.join(map), map, true) {
                        Ok(texture) => texture,
                        Err(err) => {
                            warn!(object = id.0, error = %err, "colour map unavailable, using placeholder");
                            Texture::white(device, queue)
                        }
                    };
                let normal_texture = match normal_map {
                    Some(name) => match Texture::from_path(
                        device,
                        queue,
                        &assets_dir.join(name),
                        name,
                        false,
                    ) {
                        Ok(texture) => texture,
                        Err(err) => {
                            warn!(object = id.0, error = %err, "normal map unavailable, using neutral");
                            Texture::neutral_normal(device, queue)
                        }
                    },
                    None => Texture::neutral_normal(device, queue),
                };
                materials.insert(
                    *id,
                    material_bind_group(device, &material_layout, &map_texture, &normal_texture),
                );
            }
        }

        let background = scene.background().map(|name| {
            let texture =
                match Texture::from_path(device, queue, &assets_dir.join(name), name, true) {
                    Ok(texture) => texture,
                    Err(err) => {
                        warn!(error = %err, "background unavailable, using black");
                        Texture::solid(device, queue, [0, 0, 0, 255], "background_placeholder", true)
                    }
                };
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("background_bind_group"),
                layout: &background_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            })
        });

        // One GPU mesh per distinct shape in the scene
        let mut meshes = BTreeMap::new();
        for object in scene.objects().values() {
            let key = mesh::key(&object.shape);
            meshes
                .entry(key)
                .or_insert_with(|| GpuMesh::upload(device, &mesh::build(&object.shape)));
        }

        // Helper geometry
        let grid_verts = grid_lines(GRID_SIZE, GRID_DIVISIONS);
        let grid_vertex_count = grid_verts.len() as u32;
        let grid_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: bytemuck::cast_slice(&grid_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let marker_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marker_vertex_buffer"),
            size: MARKER_VERTEX_COUNT as u64 * std::mem::size_of::<LineVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Instance buffer (pre-allocated)
        let max_instances = 10_000u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            object_pipeline,
            background_pipeline,
            helper_pipeline,
            globals_buffer,
            globals_bind_group,
            default_material,
            materials,
            background,
            meshes,
            instance_buffer,
            max_instances,
            grid_vertex_buffer,
            grid_vertex_count,
            marker_vertex_buffer,
            depth_texture,
            surface_format,
            show_helpers: true,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn set_helpers_enabled(&mut self, on: bool) {
        self.show_helpers = on;
    }

    pub fn helpers_enabled(&self) -> bool {
        self.show_helpers
    }

    /// Render one frame: background, instanced objects, helper overlays.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &Camera,
        scene: &Scene,
    ) {
        let (point_pos, point_color) = match scene.point_light() {
            Some(light) => (
                light.position,
                [
                    light.color.r * light.intensity,
                    light.color.g * light.intensity,
                    light.color.b * light.intensity,
                    1.0,
                ],
            ),
            None => (Vec3::ZERO, [0.0; 4]),
        };
        let ambient_color = match scene.ambient_light() {
            Some(light) => [
                light.color.r * light.intensity,
                light.color.g * light.intensity,
                light.color.b * light.intensity,
                1.0,
            ],
            None => [0.0; 4],
        };
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: camera.view_projection().to_cols_array_2d(),
                point_light_pos: [point_pos.x, point_pos.y, point_pos.z, 1.0],
                point_light_color: point_color,
                ambient_color,
            }),
        );

        // Group objects: flat-coloured ones batch per mesh, image-mapped
        // ones draw individually with their own bind group.
        let mut flat: BTreeMap<MeshKey, Vec<InstanceData>> = BTreeMap::new();
        let mut textured: Vec<(MeshKey, ObjectId, InstanceData)> = Vec::new();
        let mut total = 0u32;
        for (id, object) in scene.objects() {
            if total >= self.max_instances {
                break;
            }
            total += 1;
            let key = mesh::key(&object.shape);
            self.meshes
                .entry(key)
                .or_insert_with(|| GpuMesh::upload(device, &mesh::build(&object.shape)));
            let instance = instance_data(object);
            match &object.appearance {
                Appearance::Flat(_) => flat.entry(key).or_default().push(instance),
                Appearance::Textured { .. } => textured.push((key, *id, instance)),
            }
        }

        let mut instances: Vec<InstanceData> = Vec::with_capacity(total as usize);
        let mut flat_draws: Vec<(MeshKey, Range<u32>)> = Vec::with_capacity(flat.len());
        for (key, batch) in flat {
            let start = instances.len() as u32;
            instances.extend(batch);
            flat_draws.push((key, start..instances.len() as u32));
        }
        let mut textured_draws: Vec<(MeshKey, ObjectId, u32)> = Vec::with_capacity(textured.len());
        for (key, id, instance) in textured {
            let index = instances.len() as u32;
            instances.push(instance);
            textured_draws.push((key, id, index));
        }

        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let draw_marker = self.show_helpers && scene.point_light().is_some();
        if draw_marker {
            if let Some(light) = scene.point_light() {
                let marker = light_marker_lines(
                    light.position,
                    light.color.to_rgba(),
                    MARKER_RADIUS,
                );
                queue.write_buffer(&self.marker_vertex_buffer, 0, bytemuck::cast_slice(&marker));
            }
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Background first, depth writes off
            if let Some(background) = &self.background {
                pass.set_pipeline(&self.background_pipeline);
                pass.set_bind_group(0, background, &[]);
                pass.draw(0..3, 0..1);
            }

            // Scene objects
            if !instances.is_empty() {
                pass.set_pipeline(&self.object_pipeline);
                pass.set_bind_group(0, &self.globals_bind_group, &[]);
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

                for (key, range) in &flat_draws {
                    let Some(mesh) = self.meshes.get(key) else {
                        continue;
                    };
                    pass.set_bind_group(1, &self.default_material, &[]);
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, range.clone());
                }

                for (key, id, index) in &textured_draws {
                    let Some(mesh) = self.meshes.get(key) else {
                        continue;
                    };
                    let material = self.materials.get(id).unwrap_or(&self.default_material);
                    pass.set_bind_group(1, material, &[]);
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, *index..index + 1);
                }
            }

            // Helper overlays
            if self.show_helpers {
                pass.set_pipeline(&self.helper_pipeline);
                pass.set_bind_group(0, &self.globals_bind_group, &[]);
                pass.set_vertex_buffer(0, self.grid_vertex_buffer.slice(..));
                pass.draw(0..self.grid_vertex_count, 0..1);
                if draw_marker {
                    pass.set_vertex_buffer(0, self.marker_vertex_buffer.slice(..));
                    pass.draw(0..MARKER_VERTEX_COUNT, 0..1);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollscape_common::{Color, Transform};
    use scrollscape_scene::Shape;

    #[test]
    fn grid_spans_its_square() {
        let verts = grid_lines(GRID_SIZE, GRID_DIVISIONS);
        assert_eq!(verts.len(), (GRID_DIVISIONS as usize + 1) * 4);
        for v in &verts {
            assert!(v.position[0].abs() <= 100.0);
            assert_eq!(v.position[1], 0.0);
            assert!(v.position[2].abs() <= 100.0);
        }
    }

    #[test]
    fn light_marker_surrounds_the_light() {
        let center = Vec3::new(5.0, 5.0, 5.0);
        let verts = light_marker_lines(center, [1.0, 1.0, 1.0, 1.0], 1.0);
        assert_eq!(verts.len(), MARKER_VERTEX_COUNT as usize);
        for v in &verts {
            let p = Vec3::from_array(v.position);
            assert!(((p - center).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn instance_data_carries_flat_colour() {
        let mut object = SceneObject::new(
            Shape::Cuboid {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Appearance::Flat(Color::from_hex(0xFF6347)),
        );
        object.transform = Transform {
            position: Vec3::new(-10.0, 0.0, 30.0),
            ..Transform::default()
        };
        let instance = instance_data(&object);
        assert_eq!(instance.color[0], 1.0);
        assert_eq!(instance.params[0], 1.0);
        assert_eq!(instance.model_3, [-10.0, 0.0, 30.0, 1.0]);
    }

    #[test]
    fn instance_data_flags_unlit_surfaces() {
        let object = SceneObject::new(
            Shape::Cuboid {
                width: 3.0,
                height: 3.0,
                depth: 3.0,
            },
            Appearance::textured_unlit("avatar.png"),
        );
        let instance = instance_data(&object);
        assert_eq!(instance.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(instance.params[0], 0.0);
    }
}
