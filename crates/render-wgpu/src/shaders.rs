/// Lit primitives. Light kinds match [`crate::LightKind`].
pub const MESH_SHADER: &str = r#"
struct GpuLight {
    color: vec4<f32>,
    ground: vec4<f32>,
    position: vec4<f32>,
    direction: vec4<f32>,
    shape: vec4<f32>,
};

struct Frame {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_count: vec4<u32>,
    lights: array<GpuLight, 16>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) material: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) material: vec4<f32>,
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
    out.clip_position = frame.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.color = instance.color;
    out.material = instance.material;
    return out;
}

fn falloff(dist: f32, range: f32, decay: f32) -> f32 {
    var f = 1.0 / max(pow(dist, decay), 0.01);
    if (range > 0.0) {
        let edge = clamp(1.0 - pow(dist / range, 4.0), 0.0, 1.0);
        f = f * edge * edge;
    }
    return f;
}

// Diffuse plus a Blinn-Phong lobe whose width follows roughness.
fn shade(n: vec3<f32>, v: vec3<f32>, l: vec3<f32>, radiance: vec3<f32>,
         albedo: vec3<f32>, roughness: f32, metalness: f32) -> vec3<f32> {
    let n_dot_l = max(dot(n, l), 0.0);
    if (n_dot_l <= 0.0) {
        return vec3<f32>(0.0);
    }
    let h = normalize(l + v);
    let r = max(roughness, 0.04);
    let shininess = max(2.0 / (r * r * r * r) - 2.0, 1.0);
    let f0 = mix(vec3<f32>(0.04), albedo, metalness);
    let spec = f0 * pow(max(dot(n, h), 0.0), shininess) * (shininess + 8.0) / 25.13274;
    let diffuse = albedo * (1.0 - metalness) / 3.14159265;
    return (diffuse + spec) * radiance * n_dot_l;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    let v = normalize(frame.camera_pos.xyz - in.world_pos);
    // Planes are visible from both sides.
    if (dot(n, v) < 0.0) {
        n = -n;
    }
    let albedo = in.color.rgb;
    let roughness = in.material.x;
    let metalness = in.material.y;

    var total = vec3<f32>(0.0);
    for (var i = 0u; i < frame.light_count.x; i = i + 1u) {
        let light = frame.lights[i];
        let kind = u32(light.ground.w);
        let radiance = light.color.rgb * light.color.w;
        switch kind {
            case 0u: {
                total += albedo * (1.0 - metalness) * radiance;
            }
            case 1u: {
                total += shade(n, v, -light.direction.xyz, radiance * 3.14159265, albedo, roughness, metalness);
            }
            case 2u: {
                let w = 0.5 * dot(n, light.direction.xyz) + 0.5;
                total += albedo * (1.0 - metalness) * mix(light.ground.rgb, light.color.rgb, w) * light.color.w;
            }
            case 3u: {
                let to_light = light.position.xyz - in.world_pos;
                let dist = length(to_light);
                let att = falloff(dist, light.position.w, light.direction.w);
                total += shade(n, v, to_light / dist, radiance * 3.14159265 * att, albedo, roughness, metalness);
            }
            case 4u: {
                let to_light = light.position.xyz - in.world_pos;
                let dist = length(to_light);
                let l = to_light / dist;
                let cone = smoothstep(light.shape.x, light.shape.y, dot(-l, light.direction.xyz));
                let att = falloff(dist, light.position.w, light.direction.w) * cone;
                total += shade(n, v, l, radiance * 3.14159265 * att, albedo, roughness, metalness);
            }
            case 5u: {
                // Rect area approximated as a one-sided emitter at its centre.
                let to_light = light.position.xyz - in.world_pos;
                let dist = length(to_light);
                let l = to_light / dist;
                let facing = max(dot(-l, light.direction.xyz), 0.0);
                let area = light.shape.z * light.shape.w;
                let att = area * facing / max(dist * dist, 0.01);
                total += shade(n, v, l, radiance * att, albedo, roughness, metalness);
            }
            default: {}
        }
    }
    return vec4<f32>(total, in.color.a);
}
"#;

/// Light helper lines.
pub const LINE_SHADER: &str = r#"
struct Frame {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = frame.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Copies the offscreen target onto the surface with a fullscreen triangle.
pub const BLIT_SHADER: &str = r#"
@group(0) @binding(0)
var source: texture_2d<f32>;
@group(0) @binding(1)
var source_sampler: sampler;

struct BlitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_blit(@builtin(vertex_index) index: u32) -> BlitOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BlitOutput;
    out.clip_position = vec4<f32>(uv * vec2<f32>(2.0, -2.0) + vec2<f32>(-1.0, 1.0), 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_blit(in: BlitOutput) -> @location(0) vec4<f32> {
    return textureSample(source, source_sampler, in.uv);
}
"#;
