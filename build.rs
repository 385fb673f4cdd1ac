use vergen::{BuildBuilder, CargoBuilder, Emitter};
use vergen_git2::Git2Builder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_date(true).build()?;
    let cargo = CargoBuilder::default().target_triple(true).build()?;

    // Builds from a source tarball have no repository to describe
    let git2_result = Git2Builder::default()
        .describe(true, true, None)
        .sha(true)
        .build();

    match git2_result {
        Ok(git2) => {
            Emitter::default()
                .add_instructions(&build)?
                .add_instructions(&cargo)?
                .add_instructions(&git2)?
                .emit()?;
        }
        Err(_) => {
            println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=unknown");
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
            Emitter::default()
                .add_instructions(&build)?
                .add_instructions(&cargo)?
                .emit()?;
        }
    }

    Ok(())
}
