//! OpenCL ядро для матричного умножения

/// Имя точки входа ядра
///
/// Историческое имя `vecadd` сохранено ради совместимости с исходным
/// текстом программы; ядро выполняет матричное умножение.
pub static MATRIX_MULTIPLY_ENTRY: &str = "vecadd";

/// Исходный код ядра
///
/// Каждая work-item получает собственную пару (row, col) из двумерного
/// индексного пространства [widthB, heightA] и пишет ровно один элемент
/// результата, поэтому зависимостей между work-item нет.
pub static MATRIX_MULTIPLY_KERNEL: &str = r#"
__kernel void vecadd(
    __global float *outputC,
    int widthA,
    int heightA,
    int widthB,
    int heightB,
    __global const float *inputA,
    __global const float *inputB
) {
    const int row = get_global_id(1);
    const int col = get_global_id(0);

    float sum = 0.0f;

    for (int i = 0; i < widthA; i++) {
        sum += inputA[row * widthA + i] * inputB[i * widthB + col];
    }

    outputC[row * widthB + col] = sum;
}
"#;
