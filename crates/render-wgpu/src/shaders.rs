/// WGSL shader for instanced scene objects: image map, optional normal
/// map via TBN, one point light plus ambient, and a per-instance flag
/// selecting shaded or full-bright output.
pub const OBJECT_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    point_light_pos: vec4<f32>,
    point_light_color: vec4<f32>,
    ambient_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0) var map_texture: texture_2d<f32>;
@group(1) @binding(1) var map_sampler: sampler;
@group(1) @binding(2) var normal_texture: texture_2d<f32>;
@group(1) @binding(3) var normal_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) tangent: vec3<f32>,
};

struct InstanceInput {
    @location(4) model_0: vec4<f32>,
    @location(5) model_1: vec4<f32>,
    @location(6) model_2: vec4<f32>,
    @location(7) model_3: vec4<f32>,
    @location(8) color: vec4<f32>,
    @location(9) params: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) world_tangent: vec3<f32>,
    @location(3) uv: vec2<f32>,
    @location(4) color: vec4<f32>,
    @location(5) lit: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.world_tangent = (model * vec4<f32>(vertex.tangent, 0.0)).xyz;
    out.uv = vertex.uv;
    out.color = instance.color;
    out.lit = instance.params.x;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(map_texture, map_sampler, in.uv) * in.color;

    let n = normalize(in.world_normal);
    let t = normalize(in.world_tangent - dot(in.world_tangent, n) * n);
    let b = cross(n, t);
    let sampled = textureSample(normal_texture, normal_sampler, in.uv).xyz * 2.0 - 1.0;
    let mapped = normalize(sampled.x * t + sampled.y * b + sampled.z * n);

    let light_dir = normalize(globals.point_light_pos.xyz - in.world_pos);
    let diffuse = max(dot(mapped, light_dir), 0.0);
    let lighting = globals.ambient_color.rgb + globals.point_light_color.rgb * diffuse;
    let shade = mix(vec3<f32>(1.0), lighting, in.lit);
    return vec4<f32>(base.rgb * shade, base.a);
}
"#;

/// WGSL shader for the fullscreen background image: one oversized
/// triangle, drawn first with depth writes off.
pub const BACKGROUND_SHADER: &str = r#"
@group(0) @binding(0) var background_texture: texture_2d<f32>;
@group(0) @binding(1) var background_sampler: sampler;

struct BackgroundOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_background(@builtin(vertex_index) index: u32) -> BackgroundOutput {
    let corner = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BackgroundOutput;
    out.clip_position = vec4<f32>(corner * 2.0 - 1.0, 1.0, 1.0);
    out.uv = vec2<f32>(corner.x, 1.0 - corner.y);
    return out;
}

@fragment
fn fs_background(in: BackgroundOutput) -> @location(0) vec4<f32> {
    return textureSample(background_texture, background_sampler, in.uv);
}
"#;

/// WGSL shader for helper lines: the ground grid and the point-light marker.
pub const HELPER_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_helper(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = globals.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_helper(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
