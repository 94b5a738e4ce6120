use arbitrary::Arbitrary;
use clap::Parser;
use image_optimizer::cli::Cli;
use image_optimizer::cli::to_args::ToArgs;

#[test]
fn fuzz_cli_args_roundtrip() {
    let mut seed: u32 = 0x2545_f491;

    for i in 0..200 {
        let data: Vec<u8> = (0..1024)
            .map(|_| {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (seed >> 24) as u8
            })
            .collect();
        let mut rng = arbitrary::Unstructured::new(&data);
        let Ok(cli) = Cli::arbitrary(&mut rng) else {
            continue;
        };

        let args = cli.to_args();

        let mut full_args = vec!["test-exe".into()];
        full_args.extend(args);

        let parsed_cli = match Cli::try_parse_from(&full_args) {
            Ok(parsed) => parsed,
            Err(e) => panic!(
                "Failed to parse CLI args on iteration {}: {}\nOriginal CLI: {:?}\nArgs: {:?}",
                i, e, cli, full_args
            ),
        };

        if cli != parsed_cli {
            panic!(
                "CLI roundtrip failed on iteration {}:\nOriginal: {:?}\nParsed: {:?}\nArgs: {:?}",
                i, cli, parsed_cli, full_args
            );
        }
    }
}
