fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Point prost-build at a vendored `protoc` unless the environment already
    // provides one, so the gRPC codegen works without a system install.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }
    tonic_build::compile_protos("proto/stitcher.proto")?;
    Ok(())
}
