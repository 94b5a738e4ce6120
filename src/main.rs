fn main() -> eyre::Result<()> {
    image_optimizer::main()
}
