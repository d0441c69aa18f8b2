use std::borrow::Cow;

/// CIFAR-10 类别表，顺序与模型输出一致
pub const CLASS_NAMES: [&str; 10] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

/// 类别索引转名称；超出表范围时返回 "Class N"
pub fn label_for(index: usize) -> Cow<'static, str> {
    match CLASS_NAMES.get(index) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("Class {}", index)),
    }
}

/// 名称转类别索引
pub fn index_of(name: &str) -> Option<usize> {
    CLASS_NAMES.iter().position(|&label| label == name)
}
