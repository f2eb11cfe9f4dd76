fn main() {
    // Recompile when any shader files change
    println!("cargo:rerun-if-changed=shaders/");
    println!("cargo:rerun-if-changed=shaders/fading_pars_vertex.glsl");
    println!("cargo:rerun-if-changed=shaders/fading_vertex.glsl");
    println!("cargo:rerun-if-changed=shaders/fading_pars_fragment.glsl");
    println!("cargo:rerun-if-changed=shaders/fading_fragment.glsl");
}
