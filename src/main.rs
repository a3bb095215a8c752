use anyhow::{Context, Result};
use num_complex::Complex;

use shor_code::core::codec::{extract_significant_amplitudes, index_to_bitstring};
use shor_code::core::noise::sample_fault;
use shor_code::core::shor::{self, REGISTER_WIDTH};
use shor_code::core::syndrome::{AncillaLayout, Syndrome, SyndromeReport};
use shor_code::model::qubit::Qubit;
use shor_code::model::register::Register;

/// Runs one full trial: encode a logical qubit, inject a random structured
/// fault, extract the ancilla syndrome, compare it against the prediction
/// from the fault's label, then recover and un-encode.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut rng = rand::rng();

    // A deliberately lopsided input so the recovered amplitudes are
    // recognisable: |ψ⟩ = 0.6|0⟩ + 0.8|1⟩.
    let input = Qubit::new(Complex::new(0.6, 0.0), Complex::new(0.8, 0.0))
        .context("input amplitudes must be normalised")?;

    println!("Nine-Qubit Code Trial");
    println!("---------------------");
    println!("Input: {input}");

    let fault = sample_fault(&mut rng, true);
    println!("Injected: {}", fault.gate);

    let circuit = shor::trial_with_recovery(fault.gate);
    let mut state = circuit.run(Register::from_qubit(input, REGISTER_WIDTH));

    let significant = extract_significant_amplitudes(state.amplitudes(), 8);
    let (_, bits) = significant
        .first()
        .context("simulation produced an empty state")?;

    let expected = Syndrome::expected(&fault.label);
    let observed = Syndrome::observed(bits, &AncillaLayout::default())?;
    let report = SyndromeReport::compare(&expected, &observed);

    println!();
    print!("{report}");
    println!(
        "Syndrome {} the injected fault.",
        if report.is_consistent() {
            "matches"
        } else {
            "does NOT match"
        }
    );

    println!();
    println!("Recovered state (ancilla wires still carry the syndrome):");
    for (amplitude, bits) in &significant {
        println!("  ({amplitude:.4})|{bits}⟩");
    }

    let outcome = state.measure(&mut rng);
    println!(
        "Measured shot: |{}⟩",
        index_to_bitstring(outcome, REGISTER_WIDTH as usize, true)
    );

    Ok(())
}
