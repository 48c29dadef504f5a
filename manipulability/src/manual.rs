/*!

This is the long-form manual for `manipulability` and its command line program.

## What is measured

An election is described by a *profile*: one ballot per voter, each ballot being a
complete ranking of the alternatives `0..n`. A scoring rule turns a profile into
a score per alternative, and the alternatives with the highest score are the
winners. Ties are not broken: all of them win.

A profile is *manipulable* if some voter can submit a ballot different from their
truthful one and get elected an alternative that they prefer to every truthful
winner. The program draws many profiles uniformly at random and reports the
share of manipulable ones.

## Scoring rules

* `plurality` one point for the first alternative of each ballot.
* `borda` with `n` alternatives, `n - 1` points for the first alternative of a
  ballot, `n - 2` for the second one, and so on down to 0 for the last one.
* `copeland` each pair of alternatives is a majority contest. An alternative gets
  `+1` for each contest it wins, `-1` for each contest it loses, and `0` for ties.

## Searching for a manipulation

Deciding manipulability exactly requires going through all the `n!` ballots of
every voter. This crate uses a greedy search instead. For a voter and an
alternative `a` they prefer to all the winners, it builds a ballot with `a` at
the top and fills the next positions one by one, taking the smallest alternative
that does not get more points than `a` when the other ones are listed after it.
If no alternative fits some position, the voter gives up on `a` and tries the
next alternative of their truthful ballot.

Voters stop looking as soon as they reach an alternative of their ballot that
already wins: they are considered satisfied.

The search only reports manipulations that are real, but it may miss some.
The figures are therefore lower bounds of the true rates of manipulability.

## Running experiments

A single experiment:

```bash
manipulability --rule borda --alternatives 4 --voters 5 --samples 1000 --seed 42
```

This prints a line such as:

```text
Rule: borda. Alternatives: 4. Voters: 5. Samples: 1000. Manipulable: 623 (62.30%). Nonmanipulable: 377 (37.70%).
```

and writes the same line in the results directory (`results` by default).

## Configuration

Batches of experiments are described in a JSON file passed with `--config`:

```json
{
  "outputSettings": {
    "resultsDirectory": "results",
    "resultsFileName": "first_test"
  },
  "randomSeed": "42",
  "experiments": [
    { "rule": "plurality", "alternatives": 4, "voters": 4, "samples": 100 },
    { "rule": "plurality", "alternatives": 5, "voters": 10, "samples": 100 }
  ]
}
```

- `outputSettings.resultsDirectory` (string, optional, default `results`): the
  directory of the results file. It is created if it does not exist.
- `outputSettings.resultsFileName` (string): the results file. It contains one
  line per experiment, in order.
- `outputSettings.summaryPath` (string, optional): where to write a JSON summary
  of the batch, or `stdout`.
- `randomSeed` (string or number, optional): the seed of the random generator.
  Without it, every run draws different profiles.
- `experiments[].rule`: `plurality`, `borda` or `copeland`.

The command line options `--results-dir`, `--results-file`, `--seed` and `--out`
override the corresponding settings of the file.

 */
