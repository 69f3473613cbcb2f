use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// 卡片固定 5x5 = 25 格
pub const GRID_SIZE: usize = 25;
/// 号码取值范围 1..=MAX_NUMBER
pub const MAX_NUMBER: i32 = 25;
/// 25 位全满掩码
pub const FULL_MASK: u32 = (1 << GRID_SIZE) - 1;

/// 12 条可完成的线, id 与判定顺序固定: 行 0-4, 列 0-4, 主对角线, 副对角线
///
/// 位置约定: 卡片位置 i 对应第 i/5 行第 i%5 列, 按用户提交顺序而非数值排序,
/// 否则行列身份与用户在卡面上看到的对不上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    #[serde(rename = "row-0")]
    Row0,
    #[serde(rename = "row-1")]
    Row1,
    #[serde(rename = "row-2")]
    Row2,
    #[serde(rename = "row-3")]
    Row3,
    #[serde(rename = "row-4")]
    Row4,
    #[serde(rename = "col-0")]
    Col0,
    #[serde(rename = "col-1")]
    Col1,
    #[serde(rename = "col-2")]
    Col2,
    #[serde(rename = "col-3")]
    Col3,
    #[serde(rename = "col-4")]
    Col4,
    #[serde(rename = "diagonal-main")]
    DiagonalMain,
    #[serde(rename = "diagonal-anti")]
    DiagonalAnti,
}

impl LineType {
    pub const ALL: [LineType; 12] = [
        LineType::Row0,
        LineType::Row1,
        LineType::Row2,
        LineType::Row3,
        LineType::Row4,
        LineType::Col0,
        LineType::Col1,
        LineType::Col2,
        LineType::Col3,
        LineType::Col4,
        LineType::DiagonalMain,
        LineType::DiagonalAnti,
    ];

    /// 该线覆盖的 5 个位置的掩码
    pub const fn mask(self) -> u32 {
        // 列掩码: 位 c, c+5, c+10, c+15, c+20
        const COL0: u32 = 1 | 1 << 5 | 1 << 10 | 1 << 15 | 1 << 20;
        match self {
            LineType::Row0 => 0b11111,
            LineType::Row1 => 0b11111 << 5,
            LineType::Row2 => 0b11111 << 10,
            LineType::Row3 => 0b11111 << 15,
            LineType::Row4 => 0b11111 << 20,
            LineType::Col0 => COL0,
            LineType::Col1 => COL0 << 1,
            LineType::Col2 => COL0 << 2,
            LineType::Col3 => COL0 << 3,
            LineType::Col4 => COL0 << 4,
            LineType::DiagonalMain => 1 | 1 << 6 | 1 << 12 | 1 << 18 | 1 << 24,
            LineType::DiagonalAnti => 1 << 4 | 1 << 8 | 1 << 12 | 1 << 16 | 1 << 20,
        }
    }

    /// 固定字符串 id, 与持久化/序列化形式一致
    pub fn id(self) -> &'static str {
        match self {
            LineType::Row0 => "row-0",
            LineType::Row1 => "row-1",
            LineType::Row2 => "row-2",
            LineType::Row3 => "row-3",
            LineType::Row4 => "row-4",
            LineType::Col0 => "col-0",
            LineType::Col1 => "col-1",
            LineType::Col2 => "col-2",
            LineType::Col3 => "col-3",
            LineType::Col4 => "col-4",
            LineType::DiagonalMain => "diagonal-main",
            LineType::DiagonalAnti => "diagonal-anti",
        }
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// 把已打卡号码映射为卡片位置掩码: grid[i] 被打卡则第 i 位置 1
pub fn create_bitmask(grid: &[i32], claimed: &HashSet<i32>) -> u32 {
    let mut mask = 0u32;
    for (i, number) in grid.iter().enumerate().take(GRID_SIZE) {
        if claimed.contains(number) {
            mask |= 1 << i;
        }
    }
    mask
}

/// 统计掩码中已完成的线, 按 LineType::ALL 的固定顺序返回
pub fn count_lines(mask: u32) -> (u32, Vec<LineType>) {
    let mut completed = Vec::new();
    for line in LineType::ALL {
        if mask & line.mask() == line.mask() {
            completed.push(line);
        }
    }
    (completed.len() as u32, completed)
}

/// 打卡集合对照卡片后的完整线状态
pub fn line_state(grid: &[i32], claimed: &HashSet<i32>) -> (u32, Vec<LineType>) {
    count_lines(create_bitmask(grid, claimed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ordered_grid() -> Vec<i32> {
        (1..=MAX_NUMBER).collect()
    }

    fn claimed(values: &[i32]) -> HashSet<i32> {
        values.iter().copied().collect()
    }

    /// 暴力参考: 每条线按位置逐格检查
    fn line_positions(index: usize) -> Vec<usize> {
        match index {
            0..=4 => (0..5).map(|c| index * 5 + c).collect(),
            5..=9 => (0..5).map(|r| r * 5 + (index - 5)).collect(),
            10 => vec![0, 6, 12, 18, 24],
            _ => vec![4, 8, 12, 16, 20],
        }
    }

    #[test]
    fn test_masks_cover_five_distinct_positions() {
        let mut seen = HashSet::new();
        for line in LineType::ALL {
            assert_eq!(line.mask().count_ones(), 5, "{line} 必须覆盖 5 格");
            assert_eq!(line.mask() & !FULL_MASK, 0);
            assert!(seen.insert(line.mask()), "{line} 掩码与其它线重复");
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_masks_match_positions() {
        for (index, line) in LineType::ALL.iter().enumerate() {
            let expected = line_positions(index)
                .into_iter()
                .fold(0u32, |mask, position| mask | 1 << position);
            assert_eq!(line.mask(), expected, "{line}");
        }
    }

    #[test]
    fn test_empty_mask_has_no_lines() {
        assert_eq!(count_lines(0), (0, vec![]));
    }

    #[test]
    fn test_full_mask_completes_all_twelve_lines() {
        let (count, lines) = count_lines(FULL_MASK);
        assert_eq!(count, 12);
        assert_eq!(lines, LineType::ALL.to_vec());
    }

    #[test]
    fn test_first_row() {
        let grid = ordered_grid();
        let (count, lines) = line_state(&grid, &claimed(&[1, 2, 3, 4, 5]));
        assert_eq!((count, lines), (1, vec![LineType::Row0]));
    }

    #[test]
    fn test_first_column() {
        let grid = ordered_grid();
        let (count, lines) = line_state(&grid, &claimed(&[1, 6, 11, 16, 21]));
        assert_eq!((count, lines), (1, vec![LineType::Col0]));
    }

    #[test]
    fn test_diagonals() {
        let grid = ordered_grid();
        let (_, lines) = line_state(&grid, &claimed(&[1, 7, 13, 19, 25]));
        assert_eq!(lines, vec![LineType::DiagonalMain]);
        let (_, lines) = line_state(&grid, &claimed(&[5, 9, 13, 17, 21]));
        assert_eq!(lines, vec![LineType::DiagonalAnti]);
    }

    #[test]
    fn test_positions_follow_submission_order_not_value_order() {
        // 打乱的卡片: 前 5 个提交的号码构成第 0 行, 与数值大小无关
        let grid = vec![
            17, 3, 25, 9, 12, //
            1, 24, 8, 20, 5, //
            11, 2, 19, 23, 6, //
            14, 22, 4, 10, 21, //
            7, 16, 13, 18, 15,
        ];
        let (count, lines) = line_state(&grid, &claimed(&[17, 3, 25, 9, 12]));
        assert_eq!((count, lines), (1, vec![LineType::Row0]));
        // 数值上的 1..=5 在这张卡上是分散的, 不构成任何线
        let (count, lines) = line_state(&grid, &claimed(&[1, 2, 3, 4, 5]));
        assert_eq!((count, lines), (0, vec![]));
    }

    #[test]
    fn test_claimed_numbers_absent_from_grid_are_ignored() {
        let grid = ordered_grid();
        let mask = create_bitmask(&grid, &claimed(&[1, 2, 30, 99]));
        assert_eq!(mask, 0b11);
    }

    #[test]
    fn test_four_claims_do_not_complete_a_row() {
        let grid = ordered_grid();
        let (count, lines) = line_state(&grid, &claimed(&[1, 2, 3, 4]));
        assert_eq!((count, lines), (0, vec![]));
    }

    #[test]
    fn test_line_ids_round_trip() {
        for line in LineType::ALL {
            let encoded = serde_json::to_value(line).unwrap();
            assert_eq!(encoded, serde_json::Value::String(line.id().to_string()));
            let decoded: LineType = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded, line);
        }
        assert_eq!(LineType::Row0.to_string(), "row-0");
        assert_eq!(LineType::DiagonalMain.to_string(), "diagonal-main");
    }

    proptest! {
        /// 任意卡片排列与任意打卡子集下, 掩码与逐格暴力判定一致
        #[test]
        fn prop_count_lines_matches_brute_force(
            grid in Just((1..=MAX_NUMBER).collect::<Vec<i32>>()).prop_shuffle(),
            claimed_bits in 0u32..=FULL_MASK,
        ) {
            let claimed: HashSet<i32> = (0..GRID_SIZE)
                .filter(|i| claimed_bits >> i & 1 == 1)
                .map(|i| grid[i])
                .collect();

            let mask = create_bitmask(&grid, &claimed);
            prop_assert_eq!(mask, claimed_bits);

            let (count, lines) = count_lines(mask);
            let expected: Vec<LineType> = LineType::ALL
                .iter()
                .enumerate()
                .filter(|(index, _)| {
                    line_positions(*index)
                        .iter()
                        .all(|position| claimed_bits >> position & 1 == 1)
                })
                .map(|(_, line)| *line)
                .collect();
            prop_assert_eq!(count as usize, expected.len());
            prop_assert_eq!(lines, expected);
        }
    }
}
