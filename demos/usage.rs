use logikit::efmt::{IMPLICIT_AND_FMT_CFG, PRETTY_FMT_CFG};
use logikit::*;

fn main() -> Result<(), LogicError> {
    println!("A simple example!");

    let e: Expr = "A B C + A !B C + C !A".parse()?;
    println!("Parsed expression: {}", &e);
    println!("Implicit AND: {}", IMPLICIT_AND_FMT_CFG.infix(&e));
    println!("Pretty: {}", PRETTY_FMT_CFG.infix(&e));

    let table = build_table(&e, None)?;
    println!("Truth table over {}:", table.variables());
    for row in table.rows() {
        let inputs: String = row.inputs.iter().map(|b| if *b { '1' } else { '0' }).collect();
        println!("  {} | {}", inputs, row.output);
    }

    println!("CDNF: {}", to_cdnf(&table));
    println!("CCNF: {}", to_ccnf(&table));
    println!("Minimal DNF: {}", minimize_dnf(&table)?);
    println!("Minimal CNF: {}", minimize_cnf(&table)?);

    let constructed = (Expr::var("A") | !Expr::var("B")) & Expr::var("C");
    println!("Constructed: {}", &constructed);
    println!("NAND only: {}", to_nand_only(&constructed));
    println!("NOR only: {}", to_nor_only(&constructed));

    let left: Expr = "A @ B @ C".parse()?;
    let right: Expr = "A @ (B @ C)".parse()?;
    match check_equivalent(&left, &right)?.counterexample {
        None => println!("{} and {} are equivalent", left, right),
        Some(diff) => println!("{} and {} differ: {}", left, right, diff),
    }

    Ok(())
}
