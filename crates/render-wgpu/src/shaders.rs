/// WGSL shader for lit triangles: one positional light with distance
/// attenuation, per-vertex material, two-sided Blinn-Phong shading.
pub const LIT_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    light_position: vec4<f32>,
    light_ambient: vec4<f32>,
    light_diffuse: vec4<f32>,
    light_specular: vec4<f32>,
    // x = constant, y = linear, z = quadratic
    attenuation: vec4<f32>,
    global_ambient: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) ambient: vec4<f32>,
    @location(3) diffuse: vec4<f32>,
    @location(4) specular: vec4<f32>,
    @location(5) shininess: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) ambient: vec4<f32>,
    @location(3) diffuse: vec4<f32>,
    @location(4) specular: vec4<f32>,
    @location(5) shininess: f32,
};

@vertex
fn vs_lit(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_position = vertex.position;
    out.world_normal = vertex.normal;
    out.ambient = vertex.ambient;
    out.diffuse = vertex.diffuse;
    out.specular = vertex.specular;
    out.shininess = vertex.shininess;
    return out;
}

@fragment
fn fs_lit(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (!front) {
        n = -n;
    }

    let to_light = uniforms.light_position.xyz - in.world_position;
    let distance = length(to_light);
    let l = to_light / max(distance, 1e-5);
    let v = normalize(uniforms.eye.xyz - in.world_position);
    let h = normalize(l + v);

    let a = uniforms.attenuation;
    let falloff = 1.0 / max(a.x + a.y * distance + a.z * distance * distance, 1e-5);

    let n_dot_l = max(dot(n, l), 0.0);
    var highlight = 0.0;
    if (n_dot_l > 0.0) {
        highlight = pow(max(dot(n, h), 0.0), max(in.shininess, 1.0));
    }

    let ambient = uniforms.global_ambient.rgb * in.ambient.rgb
        + falloff * uniforms.light_ambient.rgb * in.ambient.rgb;
    let diffuse = falloff * n_dot_l * uniforms.light_diffuse.rgb * in.diffuse.rgb;
    let specular = falloff * highlight * uniforms.light_specular.rgb * in.specular.rgb;

    return vec4<f32>(clamp(ambient + diffuse + specular, vec3<f32>(0.0), vec3<f32>(1.0)), in.diffuse.a);
}
"#;

/// WGSL shader for unlit lines and triangles with per-vertex colour.
pub const COLOR_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct ColorVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct ColorOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_color(vertex: ColorVertex) -> ColorOutput {
    var out: ColorOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_color(in: ColorOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
